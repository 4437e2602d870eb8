pub mod code_tables;
pub mod display;
pub mod normalizer;
pub mod profiles;
pub mod units;
