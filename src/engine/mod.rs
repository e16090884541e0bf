pub mod analyzer;
pub mod error;
