//! Database service layer
//!
//! This module bundles the repositories behind a single cloneable handle

use crate::database::{
    DatabasePool, DonationRepository, DriveRepository, InventoryRepository,
    NotificationRepository, RequestRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub requests: RequestRepository,
    pub donations: DonationRepository,
    pub drives: DriveRepository,
    pub inventory: InventoryRepository,
    pub notifications: NotificationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            requests: RequestRepository::new(pool.clone()),
            donations: DonationRepository::new(pool.clone()),
            drives: DriveRepository::new(pool.clone()),
            inventory: InventoryRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_service_creation() {
        let pool = sqlx::PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let service = DatabaseService::new(pool);
            let cloned = service.clone();
            drop(cloned);
        }
    }
}
