//! Services module
//!
//! This module contains business logic services

pub mod approval;
pub mod auth;
pub mod donation;
pub mod drive;
pub mod inventory;
pub mod notification;
pub mod request;
pub mod user;

// Re-export commonly used services
pub use approval::{AdminDashboard, ApprovalService};
pub use auth::{AuthService, Claims, RegisterDetails};
pub use donation::{DonationService, DonorDashboard, NewDonation};
pub use drive::{DriveDetail, DriveService, OrganizerDriveStats};
pub use inventory::{BankStock, InventoryService};
pub use notification::{NotificationService, NotificationStats};
pub use request::{HospitalDashboard, NewBloodRequest, RequestService};
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub donation_service: DonationService,
    pub request_service: RequestService,
    pub drive_service: DriveService,
    pub inventory_service: InventoryService,
    pub approval_service: ApprovalService,
    pub notification_service: NotificationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        let notification_service =
            NotificationService::new(db.notifications.clone(), settings.features.notifications);

        Self {
            auth_service: AuthService::new(db.users.clone(), settings.clone()),
            user_service: UserService::new(db.users.clone()),
            donation_service: DonationService::new(
                db.donations.clone(),
                db.drives.clone(),
                settings.clone(),
            ),
            request_service: RequestService::new(db.requests.clone(), db.inventory.clone()),
            drive_service: DriveService::new(
                db.drives.clone(),
                db.donations.clone(),
                notification_service.clone(),
            ),
            inventory_service: InventoryService::new(db.inventory.clone(), settings),
            approval_service: ApprovalService::new(
                db.requests,
                db.donations,
                db.inventory,
                db.users,
                db.drives,
                notification_service.clone(),
            ),
            notification_service,
        }
    }
}
