//! Donation model
//!
//! Donors schedule or record donations; an admin accepts (crediting
//! inventory), rejects, or marks them completed. Completion stamps the
//! donor's last donation date, which drives the eligibility interval.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::LifelinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Accepted => "ACCEPTED",
            DonationStatus::Rejected => "REJECTED",
            DonationStatus::Completed => "COMPLETED",
            DonationStatus::Cancelled => "CANCELLED",
        }
    }

    /// Pending donations can be decided or cancelled; accepted donations can
    /// only complete. Everything else is terminal.
    pub fn can_transition_to(&self, to: DonationStatus) -> bool {
        matches!(
            (self, to),
            (
                DonationStatus::Pending,
                DonationStatus::Accepted | DonationStatus::Rejected | DonationStatus::Cancelled
            ) | (DonationStatus::Accepted, DonationStatus::Completed)
        )
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DonationStatus::Pending),
            "ACCEPTED" => Ok(DonationStatus::Accepted),
            "REJECTED" => Ok(DonationStatus::Rejected),
            "COMPLETED" => Ok(DonationStatus::Completed),
            "CANCELLED" => Ok(DonationStatus::Cancelled),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown donation status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donation {
    pub id: i64,
    pub donor_id: i64,
    pub drive_id: Option<i64>,
    pub request_id: Option<i64>,
    pub donation_date: DateTime<Utc>,
    pub blood_type: String,
    pub units: i32,
    pub status: String,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    pub fn status(&self) -> Result<DonationStatus, LifelinkError> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonationRequest {
    pub donor_id: i64,
    pub drive_id: Option<i64>,
    pub request_id: Option<i64>,
    pub donation_date: DateTime<Utc>,
    pub blood_type: String,
    pub units: i32,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            DonationStatus::Pending,
            DonationStatus::Accepted,
            DonationStatus::Rejected,
            DonationStatus::Completed,
            DonationStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<DonationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_pending_transitions() {
        let pending = DonationStatus::Pending;
        assert!(pending.can_transition_to(DonationStatus::Accepted));
        assert!(pending.can_transition_to(DonationStatus::Rejected));
        assert!(pending.can_transition_to(DonationStatus::Cancelled));
        assert!(!pending.can_transition_to(DonationStatus::Completed));
    }

    #[test]
    fn test_accepted_only_completes() {
        let accepted = DonationStatus::Accepted;
        assert!(accepted.can_transition_to(DonationStatus::Completed));
        assert!(!accepted.can_transition_to(DonationStatus::Rejected));
        assert!(!accepted.can_transition_to(DonationStatus::Pending));
    }
}
