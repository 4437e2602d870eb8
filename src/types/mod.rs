pub mod condition;
pub mod error;
pub mod language;
pub mod measurement;
pub mod monitor_target;
pub mod road_section;
pub mod snapshot;
