use crate::domain::value_objects::UserId;
use crate::ports::user_service::{Result, UserService as UserServiceTrait};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock implementation of UserService
///
/// Supports stateful testing by storing user IDs.
/// Registered users are the only ones that resolve.
pub struct UserService {
    existing_users: Mutex<HashSet<UserId>>,
}

impl UserService {
    pub fn new() -> Self {
        Self {
            existing_users: Mutex::new(HashSet::new()),
        }
    }

    /// Register a user for testing purposes
    pub fn add_user(&self, user_id: UserId) {
        self.existing_users.lock().unwrap().insert(user_id);
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    /// Check if user exists among the registered users
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        Ok(self.existing_users.lock().unwrap().contains(&user_id))
    }
}
