use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{TransitionError, UnknownStateError};
use super::value_objects::{BookingId, BookingPeriod, ItemId, UserId};

// ============================================================================
// ステータス
// ============================================================================

/// 予約ステータス
///
/// 線形の状態機械：`Waiting`（初期）から`Approved`または`Rejected`へ。
/// 両者は終端であり、そこからの遷移は一切許可されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// 承認待ち（初期状態）
    Waiting,
    /// 承認済み（終端）
    Approved,
    /// 却下済み（終端）
    Rejected,
}

impl BookingStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// 終端ステータスか（これ以上の遷移が不可能か）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Waiting)
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// ============================================================================
// Booking集約
// ============================================================================

/// Booking集約 - 1つのアイテムに対する1件の時間指定予約
///
/// 作成時は必ず`Waiting`。ステータスは`decide`によってのみ変化し、
/// レコード自体は削除されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub booking_id: BookingId,

    // 他の集約への参照（IDのみ）
    pub item_id: ItemId,
    pub booker_id: UserId,

    // 予約管理の責務
    pub period: BookingPeriod,
    pub status: BookingStatus,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.period.end()
    }
}

/// 純粋関数：予約を申請する
///
/// ビジネスルール：
/// - 初期ステータスはWaiting
///
/// アイテムの存在・貸出可否・自己予約の禁止はアプリケーション層で
/// 検証済みであることを前提とする。副作用なし。
pub fn request_booking(
    item_id: ItemId,
    booker_id: UserId,
    period: BookingPeriod,
    requested_at: DateTime<Utc>,
) -> Booking {
    Booking {
        booking_id: BookingId::new(),
        item_id,
        booker_id,
        period,
        status: BookingStatus::Waiting,
        created_at: requested_at,
        updated_at: requested_at,
    }
}

/// 純粋関数：予約を承認または却下する
///
/// ビジネスルール：
/// - Waiting状態からのみ遷移可能
/// - approve=trueならApproved、falseならRejected
/// - Approved / Rejectedは終端であり再遷移不可
///
/// 副作用なし。新しいBookingを返す。
pub fn decide(
    booking: &Booking,
    approve: bool,
    decided_at: DateTime<Utc>,
) -> Result<Booking, TransitionError> {
    if booking.status.is_terminal() {
        return Err(TransitionError::AlreadyDecided(booking.status.as_str()));
    }

    let status = if approve {
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    };

    Ok(Booking {
        status,
        updated_at: decided_at,
        ..booking.clone()
    })
}

// ============================================================================
// カテゴリ分類
// ============================================================================

/// 予約一覧の絞り込みカテゴリ
///
/// 境界層で一度だけ文字列からパースされる閉じた列挙型。
/// 時間軸（Current / Past / Future）とステータス軸（Waiting / Rejected）の
/// 2軸の述語を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingCategory {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingCategory {
    /// 予約がこのカテゴリに属するか
    ///
    /// 時間比較はすべて呼び出し側が一度だけ取得した`now`に対して行う。
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingCategory::All => true,
            BookingCategory::Current => booking.period.contains(now),
            BookingCategory::Past => booking.period.ended_before(now),
            BookingCategory::Future => booking.period.starts_after(now),
            BookingCategory::Waiting => booking.status == BookingStatus::Waiting,
            BookingCategory::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

impl std::str::FromStr for BookingCategory {
    type Err = UnknownStateError;

    /// 大文字小文字を区別せずにパースする
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(BookingCategory::All),
            "CURRENT" => Ok(BookingCategory::Current),
            "PAST" => Ok(BookingCategory::Past),
            "FUTURE" => Ok(BookingCategory::Future),
            "WAITING" => Ok(BookingCategory::Waiting),
            "REJECTED" => Ok(BookingCategory::Rejected),
            _ => Err(UnknownStateError(s.to_string())),
        }
    }
}

// ============================================================================
// 可用性インデックスの導出
// ============================================================================

/// 純粋関数：直近の完了予約を選ぶ
///
/// Approvedかつ`start < now`の予約のうち、`end`が最大のもの。
/// 該当がなければNone。
pub fn last_booking(bookings: &[Booking], now: DateTime<Utc>) -> Option<&Booking> {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .filter(|b| b.start() < now)
        .max_by_key(|b| b.end())
}

/// 純粋関数：次の予約を選ぶ
///
/// Approvedかつ`start > now`の予約のうち、`start`が最小のもの。
/// 該当がなければNone。
pub fn next_booking(bookings: &[Booking], now: DateTime<Utc>) -> Option<&Booking> {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .filter(|b| b.start() > now)
        .min_by_key(|b| b.start())
}

/// 純粋関数：コメント資格の判定
///
/// 指定ユーザーによるApprovedかつ`end < now`の予約が
/// 1件でも存在すればtrue。
pub fn has_completed_approved_booking(
    bookings: &[Booking],
    booker_id: UserId,
    now: DateTime<Utc>,
) -> bool {
    bookings
        .iter()
        .filter(|b| b.booker_id == booker_id)
        .filter(|b| b.status == BookingStatus::Approved)
        .any(|b| b.period.ended_before(now))
}
