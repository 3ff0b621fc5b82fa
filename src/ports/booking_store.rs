use crate::domain::booking::{Booking, BookingCategory, BookingStatus};
use crate::domain::value_objects::{BookingId, ItemId, Page, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
///
/// 予約レコードの永続化を抽象化する。IDによる点検索と、
/// 述語（予約者・アイテム集合・ステータス・時間比較）による一覧取得を
/// 提供する。一覧はすべて`start`降順で、ページネーション可能。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 予約を保存する
    ///
    /// 新規の場合はINSERT、既存の場合はUPDATE（upsert）を実行する。
    async fn save(&self, booking: Booking) -> Result<Booking>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// ステータスを条件付きで更新する（compare-and-swap）
    ///
    /// 永続化されたステータスが`expected`と一致する場合に限り`next`へ
    /// 更新し、更新後の予約を返す。一致しなかった（または予約が存在し
    /// ない）場合はNoneを返す。並行する承認・却下の二重適用を
    /// ストアレベルの原子的更新で防ぐ。
    async fn update_status_if(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Booking>>;

    /// 予約者の予約をカテゴリで絞り込んで取得する
    ///
    /// `start`降順に整列し、`page`でスライスする。
    /// 時間述語（CURRENT / PAST / FUTURE）は渡された`now`に対して評価する。
    async fn find_for_booker(
        &self,
        booker_id: UserId,
        category: BookingCategory,
        now: DateTime<Utc>,
        page: Page,
    ) -> Result<Vec<Booking>>;

    /// アイテム集合に属する予約をカテゴリで絞り込んで取得する
    ///
    /// オーナービュー用。整列・ページネーション・時間述語の規約は
    /// `find_for_booker`と同じ。空のアイテム集合に対しては空を返す。
    async fn find_for_items(
        &self,
        item_ids: &[ItemId],
        category: BookingCategory,
        now: DateTime<Utc>,
        page: Page,
    ) -> Result<Vec<Booking>>;

    /// アイテムの全予約を取得する
    ///
    /// last/next予約の導出に使用される。
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>>;

    /// アイテム×予約者×ステータスで予約を取得する
    ///
    /// コメント資格の判定に使用される。
    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        status: BookingStatus,
    ) -> Result<Vec<Booking>>;
}
