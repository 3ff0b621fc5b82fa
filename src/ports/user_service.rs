use crate::domain::value_objects::UserId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// User Service port for identity context operations.
///
/// This port maintains context boundaries between Booking and Identity
/// contexts. The booking context only knows UserId, not user details.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Check if a user exists.
    ///
    /// Every booking operation validates its acting user through this
    /// before touching the booking store.
    async fn exists(&self, user_id: UserId) -> Result<bool>;
}
