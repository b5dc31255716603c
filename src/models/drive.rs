//! Blood drive model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::LifelinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl DriveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriveStatus::Scheduled => "SCHEDULED",
            DriveStatus::Completed => "COMPLETED",
            DriveStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for DriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriveStatus {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(DriveStatus::Scheduled),
            "COMPLETED" => Ok(DriveStatus::Completed),
            "CANCELLED" => Ok(DriveStatus::Cancelled),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown drive status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Registered,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "REGISTERED",
            RegistrationStatus::Confirmed => "CONFIRMED",
            RegistrationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTERED" => Ok(RegistrationStatus::Registered),
            "CONFIRMED" => Ok(RegistrationStatus::Confirmed),
            "CANCELLED" => Ok(RegistrationStatus::Cancelled),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown registration status: {}",
                other
            ))),
        }
    }
}

/// Live phase of a drive relative to a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DrivePhase {
    Upcoming,
    Running,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BloodDrive {
    pub id: i64,
    pub organizer_id: i64,
    pub title: String,
    pub location: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_donors: i32,
    pub blood_types_needed: Vec<String>,
    pub requirements: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BloodDrive {
    pub fn status(&self) -> Result<DriveStatus, LifelinkError> {
        self.status.parse()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> DrivePhase {
        if now < self.start_date {
            DrivePhase::Upcoming
        } else if now <= self.end_date {
            DrivePhase::Running
        } else {
            DrivePhase::Finished
        }
    }

    /// Days until start (upcoming) or until end (running); None once finished
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        match self.phase(now) {
            DrivePhase::Upcoming => Some((self.start_date - now).num_days()),
            DrivePhase::Running => Some((self.end_date - now).num_days().max(0)),
            DrivePhase::Finished => None,
        }
    }

    /// Donations collected versus the target, capped at 100
    pub fn progress_percentage(&self, donation_count: i64) -> u32 {
        if self.target_donors <= 0 {
            return 0;
        }
        let pct = donation_count as f64 / self.target_donors as f64 * 100.0;
        pct.min(100.0) as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriveRegistration {
    pub id: i64,
    pub donor_id: i64,
    pub drive_id: i64,
    pub registration_date: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

impl DriveRegistration {
    pub fn status(&self) -> Result<RegistrationStatus, LifelinkError> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDriveRequest {
    pub organizer_id: i64,
    pub title: String,
    pub location: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_donors: i32,
    pub blood_types_needed: Vec<String>,
    pub requirements: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDriveRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub target_donors: Option<i32>,
    pub blood_types_needed: Option<Vec<String>>,
    pub requirements: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForDriveRequest {
    pub donor_id: i64,
    pub drive_id: i64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn drive_between(start: DateTime<Utc>, end: DateTime<Utc>) -> BloodDrive {
        BloodDrive {
            id: 1,
            organizer_id: 7,
            title: "Community Drive".to_string(),
            location: "Town Hall".to_string(),
            description: None,
            start_date: start,
            end_date: end,
            target_donors: 50,
            blood_types_needed: vec!["O-".to_string(), "A+".to_string()],
            requirements: None,
            notes: None,
            status: "SCHEDULED".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_phase_progression() {
        let now = Utc::now();
        let upcoming = drive_between(now + Duration::days(3), now + Duration::days(4));
        assert_eq!(upcoming.phase(now), DrivePhase::Upcoming);
        assert_eq!(upcoming.days_remaining(now), Some(3));

        let running = drive_between(now - Duration::hours(2), now + Duration::days(1));
        assert_eq!(running.phase(now), DrivePhase::Running);

        let finished = drive_between(now - Duration::days(4), now - Duration::days(3));
        assert_eq!(finished.phase(now), DrivePhase::Finished);
        assert_eq!(finished.days_remaining(now), None);
    }

    #[test]
    fn test_progress_percentage() {
        let now = Utc::now();
        let drive = drive_between(now, now + Duration::days(1));
        assert_eq!(drive.progress_percentage(0), 0);
        assert_eq!(drive.progress_percentage(25), 50);
        assert_eq!(drive.progress_percentage(50), 100);
        assert_eq!(drive.progress_percentage(90), 100);
    }

    #[test]
    fn test_progress_with_zero_target() {
        let now = Utc::now();
        let mut drive = drive_between(now, now + Duration::days(1));
        drive.target_donors = 0;
        assert_eq!(drive.progress_percentage(10), 0);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            DriveStatus::Scheduled,
            DriveStatus::Completed,
            DriveStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<DriveStatus>().unwrap(), status);
        }
        for status in [
            RegistrationStatus::Registered,
            RegistrationStatus::Confirmed,
            RegistrationStatus::Cancelled,
        ] {
            assert_eq!(
                status.as_str().parse::<RegistrationStatus>().unwrap(),
                status
            );
        }
    }
}
