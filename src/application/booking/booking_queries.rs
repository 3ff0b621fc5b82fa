use crate::domain::{self, booking::BookingCategory, value_objects::*};
use chrono::Utc;

use super::booking_service::{ServiceDependencies, ensure_user_exists};
use super::errors::{BookingApplicationError, Result};

/// 予約者の予約一覧を取得する
///
/// カテゴリ述語は操作開始時に一度だけ取得した現在時刻に対して評価する。
/// 結果は`start`降順で、`page`でスライス済み。
pub async fn list_for_booker(
    deps: &ServiceDependencies,
    user_id: UserId,
    category: BookingCategory,
    page: Page,
) -> Result<Vec<domain::Booking>> {
    ensure_user_exists(&deps.user_service, user_id).await?;

    // 操作内の全時間比較はこの時刻に対して行う
    let now = Utc::now();

    deps.booking_store
        .find_for_booker(user_id, category, now, page)
        .await
        .map_err(BookingApplicationError::BookingStoreError)
}

/// 所有者のアイテムに対する予約一覧を取得する
///
/// 所有アイテム集合はカタログから呼び出しごとに一度だけ解決する。
/// アイテムを1つも所有していない場合は空を返す。
pub async fn list_for_owner(
    deps: &ServiceDependencies,
    owner_id: UserId,
    category: BookingCategory,
    page: Page,
) -> Result<Vec<domain::Booking>> {
    ensure_user_exists(&deps.user_service, owner_id).await?;

    let item_ids: Vec<ItemId> = deps
        .item_service
        .find_by_owner(owner_id)
        .await
        .map_err(BookingApplicationError::ItemServiceError)?
        .into_iter()
        .map(|item| item.item_id)
        .collect();

    let now = Utc::now();

    deps.booking_store
        .find_for_items(&item_ids, category, now, page)
        .await
        .map_err(BookingApplicationError::BookingStoreError)
}
