//! Blood request model
//!
//! Hospitals raise requests for blood units; an admin accepts, rejects or
//! fulfills them. Acceptance is the point where inventory is debited.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::LifelinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Fulfilled => "FULFILLED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether a transition from `self` to `to` is allowed.
    ///
    /// Pending requests can be decided or cancelled; accepted requests can
    /// only move on to fulfilled. Rejected, fulfilled and cancelled are
    /// terminal.
    pub fn can_transition_to(&self, to: RequestStatus) -> bool {
        matches!(
            (self, to),
            (
                RequestStatus::Pending,
                RequestStatus::Accepted | RequestStatus::Rejected | RequestStatus::Cancelled
            ) | (RequestStatus::Accepted, RequestStatus::Fulfilled)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "ACCEPTED" => Ok(RequestStatus::Accepted),
            "REJECTED" => Ok(RequestStatus::Rejected),
            "FULFILLED" => Ok(RequestStatus::Fulfilled),
            "CANCELLED" => Ok(RequestStatus::Cancelled),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown request status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BloodRequest {
    pub id: i64,
    pub hospital_id: i64,
    pub blood_type: String,
    pub units_needed: i32,
    pub priority: String,
    pub status: String,
    pub patient_details: Option<String>,
    pub admin_notes: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BloodRequest {
    pub fn status(&self) -> Result<RequestStatus, LifelinkError> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBloodRequest {
    pub hospital_id: i64,
    pub blood_type: String,
    pub units_needed: i32,
    pub priority: String,
    pub patient_details: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBloodRequest {
    pub units_needed: Option<i32>,
    pub priority: Option<String>,
    pub patient_details: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
            RequestStatus::Fulfilled,
            RequestStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_pending_transitions() {
        let pending = RequestStatus::Pending;
        assert!(pending.can_transition_to(RequestStatus::Accepted));
        assert!(pending.can_transition_to(RequestStatus::Rejected));
        assert!(pending.can_transition_to(RequestStatus::Cancelled));
        assert!(!pending.can_transition_to(RequestStatus::Fulfilled));
    }

    #[test]
    fn test_accepted_only_fulfills() {
        let accepted = RequestStatus::Accepted;
        assert!(accepted.can_transition_to(RequestStatus::Fulfilled));
        assert!(!accepted.can_transition_to(RequestStatus::Rejected));
        assert!(!accepted.can_transition_to(RequestStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        for terminal in [
            RequestStatus::Rejected,
            RequestStatus::Fulfilled,
            RequestStatus::Cancelled,
        ] {
            for target in [
                RequestStatus::Pending,
                RequestStatus::Accepted,
                RequestStatus::Rejected,
                RequestStatus::Fulfilled,
                RequestStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }
}
