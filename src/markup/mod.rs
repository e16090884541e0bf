pub mod naming;
pub mod scan;
