pub mod assembler;
pub mod catalog_model;
pub mod dedup;
