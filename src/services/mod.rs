pub mod layout;
pub mod parser;
pub mod store;
