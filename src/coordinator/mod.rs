pub mod acquisition;
pub mod error;
pub mod polling;
