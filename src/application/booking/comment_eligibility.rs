use crate::domain::{self, booking::BookingStatus, value_objects::*};
use chrono::Utc;

use super::booking_service::{ServiceDependencies, ensure_user_exists};
use super::errors::{BookingApplicationError, Result};

/// ユーザーがアイテムにコメントできることを保証する
///
/// ビジネスルール：
/// - ユーザーが存在すること
/// - そのユーザーによるApprovedかつ終了済み（`end < now`）の予約が
///   1件以上存在すること
///
/// 外部のコメント作成フローから呼ばれる。資格がなければ
/// `CommentNotAllowed`で失敗する。
pub async fn ensure_may_comment(
    deps: &ServiceDependencies,
    user_id: UserId,
    item_id: ItemId,
) -> Result<()> {
    ensure_user_exists(&deps.user_service, user_id).await?;

    let now = Utc::now();

    let bookings = deps
        .booking_store
        .find_by_item_and_booker(item_id, user_id, BookingStatus::Approved)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    if !domain::booking::has_completed_approved_booking(&bookings, user_id, now) {
        return Err(BookingApplicationError::CommentNotAllowed {
            user_id: user_id.value(),
            item_id: item_id.value(),
        });
    }

    Ok(())
}
