//! Health probe results.
//!
//! Each backing component is probed independently and reports a
//! [`ProbeStatus`]. A failed probe is a value, never an error.

use crate::RosterResult;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Outcome of a single component probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ProbeStatus {
    /// The component answered as expected.
    Ok,
    /// The component answered with an unexpected value.
    Fail,
    /// The probe itself failed.
    Error(String),
}

impl ProbeStatus {
    /// Converts the raw result of a ping into a probe status.
    #[must_use]
    pub fn from_ping(result: RosterResult<bool>) -> Self {
        match result {
            Ok(true) => Self::Ok,
            Ok(false) => Self::Fail,
            Err(e) => Self::Error(e.to_string()),
        }
    }

    /// Returns true if the probe succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Fail => f.write_str("fail"),
            Self::Error(detail) => write!(f, "error: {}", detail),
        }
    }
}

impl From<ProbeStatus> for String {
    fn from(status: ProbeStatus) -> Self {
        status.to_string()
    }
}

impl From<String> for ProbeStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ok" => Self::Ok,
            "fail" => Self::Fail,
            other => Self::Error(other.strip_prefix("error: ").unwrap_or(other).to_string()),
        }
    }
}

/// Aggregated health of the record store and the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthReport {
    /// Record store probe.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "ok"))]
    pub db: ProbeStatus,
    /// Cache probe.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "ok"))]
    pub redis: ProbeStatus,
}

impl HealthReport {
    /// Returns true if every probe succeeded.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.db.is_ok() && self.redis.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RosterError;

    #[test]
    fn test_from_ping() {
        assert_eq!(ProbeStatus::from_ping(Ok(true)), ProbeStatus::Ok);
        assert_eq!(ProbeStatus::from_ping(Ok(false)), ProbeStatus::Fail);
        let status = ProbeStatus::from_ping(Err(RosterError::cache("connection refused")));
        assert_eq!(status.to_string(), "error: Cache error: connection refused");
    }

    #[test]
    fn test_report_serializes_as_strings() {
        let report = HealthReport {
            db: ProbeStatus::Ok,
            redis: ProbeStatus::Error("timed out".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["db"], "ok");
        assert_eq!(json["redis"], "error: timed out");
        assert!(!report.is_healthy());

        let back: HealthReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
