use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{PageError, PeriodError};

/// 予約ID - 予約管理コンテキストの集約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// アイテムID - カタログ管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
///
/// 予約コンテキストでは予約者（booker）とアイテム所有者（owner）の
/// どちらもこの型で参照する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// 予約期間
///
/// 不変条件：終了時刻は開始時刻より厳密に後であること。
/// 型システムでこの制約を強制し、不正な期間を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingPeriod {
    /// 期間を作成する
    ///
    /// # エラー
    /// `end <= start` の場合は`PeriodError::EndNotAfterStart`を返す
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PeriodError> {
        if end <= start {
            return Err(PeriodError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// 指定時刻が期間内（両端含む）にあるか
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// 期間が指定時刻より前に終了しているか
    pub fn ended_before(&self, at: DateTime<Utc>) -> bool {
        self.end < at
    }

    /// 期間が指定時刻より後に開始するか
    pub fn starts_after(&self, at: DateTime<Utc>) -> bool {
        self.start > at
    }
}

/// ページネーション指定
///
/// 不変条件：ページサイズは1以上。ページ番号は0始まり。
/// 境界層（API）でバリデーションした上で生成される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// ページ指定を作成する
    ///
    /// # エラー
    /// `size == 0` の場合は`PageError::SizeIsZero`を返す
    pub fn new(number: u32, size: u32) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::SizeIsZero);
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// 先頭からスキップする件数
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }

    /// 取得する最大件数
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}
