use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::domain::value_objects::UserId;

use super::error::ApiError;

/// 操作ユーザーを運ぶカスタムヘッダー名
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// `X-Sharer-User-Id`ヘッダーから操作ユーザーを取り出すエクストラクター
///
/// ヘッダーの欠落・不正なUUIDは400 Bad Requestとして拒否する
/// （トランスポートレベルのバリデーション）。
pub struct SharerUserId(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::bad_request(format!("{} header is required", USER_ID_HEADER)))?
            .to_str()
            .map_err(|_| {
                ApiError::bad_request(format!("{} header is not valid UTF-8", USER_ID_HEADER))
            })?;

        let uuid = Uuid::parse_str(value).map_err(|_| {
            ApiError::bad_request(format!("{} header must be a valid UUID", USER_ID_HEADER))
        })?;

        Ok(SharerUserId(UserId::from_uuid(uuid)))
    }
}
