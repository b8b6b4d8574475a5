use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::UserId;
use crate::ports::user_directory::{Result, UserDirectory, UserSummary};

/// Mock implementation of UserDirectory
///
/// Supports stateful testing by storing registered users.
pub struct MockUserDirectory {
    users: Mutex<Vec<UserSummary>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// Register a user for testing purposes
    pub fn add_user(&self, user_id: i64, email: &str, role: &str) {
        self.users.lock().unwrap().push(UserSummary {
            user_id: UserId::new(user_id),
            email: email.to_string(),
            full_name: None,
            role: role.to_string(),
        });
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        Ok(self.users.lock().unwrap().clone())
    }
}
