pub mod catalogue;
pub mod directory;
pub mod error;
pub mod resolver;
