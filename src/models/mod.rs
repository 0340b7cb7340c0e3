pub mod interview;
pub mod parse;
