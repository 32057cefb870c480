use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health of one service within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    Up,
    Down,
}

impl ServiceStatus {
    pub fn from_up(up: bool) -> Self {
        if up { ServiceStatus::Up } else { ServiceStatus::Down }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, ServiceStatus::Up)
    }
}

/// Aggregate health of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    AllUp,
    PartialDown,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::AllUp => write!(f, "ALL_UP"),
            OverallStatus::PartialDown => write!(f, "PARTIAL_DOWN"),
        }
    }
}

/// Result of a finished cycle that has not been given an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRun {
    pub timestamp: DateTime<Utc>,
    pub results: BTreeMap<String, ServiceStatus>,
}

impl PendingRun {
    pub fn new(timestamp: DateTime<Utc>, results: BTreeMap<String, ServiceStatus>) -> Self {
        Self { timestamp, results }
    }

    pub fn overall(&self) -> OverallStatus {
        if self.results.values().all(ServiceStatus::is_up) {
            OverallStatus::AllUp
        } else {
            OverallStatus::PartialDown
        }
    }

    pub(crate) fn into_record(self, id: u64) -> RunRecord {
        let overall = self.overall();
        RunRecord {
            id,
            timestamp: self.timestamp,
            results: self.results,
            overall,
        }
    }
}

/// One completed health-check run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: u64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub results: BTreeMap<String, ServiceStatus>,
    pub overall: OverallStatus,
}

impl RunRecord {
    pub fn down_count(&self) -> usize {
        self.results.values().filter(|s| !s.is_up()).count()
    }
}

/// `2024-05-01T12:00:00.000Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
