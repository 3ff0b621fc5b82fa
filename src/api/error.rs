use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを
/// 提供する。境界層自身のバリデーション失敗はBadRequestで表現する。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),

            ApiError::Application(err) => match err {
                // 404 Not Found - 存在しないか、呼び出し側に見せないリソース
                BookingApplicationError::UserNotFound(_)
                | BookingApplicationError::ItemNotFound(_)
                | BookingApplicationError::BookingNotFound(_)
                | BookingApplicationError::BookingNotVisible { .. }
                | BookingApplicationError::SelfBookingForbidden
                | BookingApplicationError::Forbidden { .. } => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }

                // 400 Bad Request - ビジネスルール違反・不正な入力
                BookingApplicationError::ItemUnavailable(_)
                | BookingApplicationError::InvalidStateTransition(_)
                | BookingApplicationError::UnknownState(_)
                | BookingApplicationError::CommentNotAllowed { .. } => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }

                // 500 Internal Server Error - 外部コラボレーターの障害
                // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                BookingApplicationError::UserServiceError(ref e) => {
                    tracing::error!("User service error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "User service error".to_string(),
                    )
                }
                BookingApplicationError::ItemServiceError(ref e) => {
                    tracing::error!("Item service error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Item service error".to_string(),
                    )
                }
                BookingApplicationError::BookingStoreError(ref e) => {
                    tracing::error!("Booking store error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Booking store error".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
