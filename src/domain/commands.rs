use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingPeriod, ItemId, UserId};

/// コマンド：予約を申請する
///
/// `requested_at`は境界層で一度だけ取得した現在時刻。
/// 操作内の全比較はこの時刻に対して行われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub booker_id: UserId,
    pub item_id: ItemId,
    pub period: BookingPeriod,
    pub requested_at: DateTime<Utc>,
}

/// コマンド：予約を承認または却下する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideBooking {
    pub owner_id: UserId,
    pub booking_id: BookingId,
    pub approve: bool,
    pub decided_at: DateTime<Utc>,
}
