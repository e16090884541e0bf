pub mod attributes;
pub mod candidate;
pub mod controls;
pub mod extractor;
pub mod text;
pub mod widgets;
