//! The value a coordinator publishes each cycle.

use crate::types::condition::ConditionsReport;
use crate::types::measurement::StationSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a snapshot's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnapshotOrigin {
    /// Parsed from the provider's payloads.
    Live,
    /// Produced by the mock generator after a failed acquisition.
    Mock,
}

/// Exactly one kind of data per target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SnapshotData {
    Conditions(ConditionsReport),
    Station(StationSnapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSnapshot {
    pub origin: SnapshotOrigin,
    pub fetched_at: DateTime<Utc>,
    pub data: SnapshotData,
}

impl TargetSnapshot {
    pub fn live(data: SnapshotData) -> Self {
        Self {
            origin: SnapshotOrigin::Live,
            fetched_at: Utc::now(),
            data,
        }
    }

    pub fn mock(data: SnapshotData) -> Self {
        Self {
            origin: SnapshotOrigin::Mock,
            fetched_at: Utc::now(),
            data,
        }
    }

    pub fn conditions(&self) -> Option<&ConditionsReport> {
        match &self.data {
            SnapshotData::Conditions(report) => Some(report),
            SnapshotData::Station(_) => None,
        }
    }

    pub fn station(&self) -> Option<&StationSnapshot> {
        match &self.data {
            SnapshotData::Station(station) => Some(station),
            SnapshotData::Conditions(_) => None,
        }
    }
}
