use crate::domain::{self, value_objects::ItemId};
use chrono::Utc;

use super::booking_service::ServiceDependencies;
use super::errors::{BookingApplicationError, Result};

/// アイテムの直近の完了予約を導出する
///
/// Approvedかつ`start < now`の予約のうち`end`が最大のもの。
/// キャッシュせず呼び出しごとに再計算する。カタログが所有者に
/// アイテムを提示する際に使用される。
pub async fn last_booking(
    deps: &ServiceDependencies,
    item_id: ItemId,
) -> Result<Option<domain::Booking>> {
    let now = Utc::now();

    let bookings = deps
        .booking_store
        .find_by_item(item_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    Ok(domain::booking::last_booking(&bookings, now).cloned())
}

/// アイテムの次の予約を導出する
///
/// Approvedかつ`start > now`の予約のうち`start`が最小のもの。
pub async fn next_booking(
    deps: &ServiceDependencies,
    item_id: ItemId,
) -> Result<Option<domain::Booking>> {
    let now = Utc::now();

    let bookings = deps
        .booking_store
        .find_by_item(item_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    Ok(domain::booking::next_booking(&bookings, now).cloned())
}
