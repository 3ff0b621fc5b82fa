use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::commands::CreateBooking;
use crate::domain::errors::PeriodError;
use crate::domain::value_objects::{BookingPeriod, ItemId, UserId};

/// 予約作成リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CreateBookingRequest {
    /// リクエストをコマンドに変換する
    ///
    /// 期間の不変条件（end > start）はここで検証される。
    pub fn to_command(
        &self,
        booker_id: UserId,
        requested_at: DateTime<Utc>,
    ) -> Result<CreateBooking, PeriodError> {
        let period = BookingPeriod::new(self.start, self.end)?;
        Ok(CreateBooking {
            booker_id,
            item_id: ItemId::from_uuid(self.item_id),
            period,
            requested_at,
        })
    }
}

/// 承認・却下のクエリパラメータ（PATCH /bookings/:id）
#[derive(Debug, Deserialize)]
pub struct UpdateStatusQuery {
    pub approved: bool,
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// カテゴリでフィルタリング（デフォルトALL）
    pub state: Option<String>,
    /// 0始まりのページ番号（デフォルト0）
    pub page: Option<u32>,
    /// ページサイズ（デフォルト10）
    pub size: Option<u32>,
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.booking_id.value(),
            item_id: booking.item_id.value(),
            booker_id: booking.booker_id.value(),
            start: booking.start(),
            end: booking.end(),
            status: booking.status,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
