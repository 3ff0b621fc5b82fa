use crate::domain::value_objects::{ItemId, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// カタログが保持するアイテムの読み取りビュー
///
/// 予約コンテキストはこの3項目（ID・所有者・貸出可否）だけを読む。
/// 変更は一切行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRecord {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub available: bool,
}

/// アイテムカタログサービスポート
///
/// 予約コンテキストとカタログコンテキストの境界を維持する。
#[async_trait]
pub trait ItemService: Send + Sync {
    /// IDでアイテムを取得する
    ///
    /// 予約作成時の存在・所有者・貸出可否の検証に使用される。
    async fn get_by_id(&self, item_id: ItemId) -> Result<Option<ItemRecord>>;

    /// 所有者のアイテム一覧を取得する
    ///
    /// オーナービューの予約一覧で、所有アイテム集合の解決に使用される。
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<ItemRecord>>;
}
