pub mod interviews;
pub mod layout;
pub mod parse;
