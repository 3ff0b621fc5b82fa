use crate::domain::value_objects::{ItemId, UserId};
use crate::ports::item_service::{ItemRecord, ItemService as ItemServiceTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// ItemServiceのモック実装
///
/// アイテムレコードを保存することで状態を持ったテストをサポート。
/// 所有者と貸出可否を含めて登録可能。
pub struct ItemService {
    items: Mutex<HashMap<ItemId, ItemRecord>>,
}

impl ItemService {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用にアイテムを登録
    pub fn add_item(&self, item_id: ItemId, owner_id: UserId, available: bool) {
        self.items.lock().unwrap().insert(
            item_id,
            ItemRecord {
                item_id,
                owner_id,
                available,
            },
        );
    }

    /// テスト用に貸出可否を変更
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&item_id) {
            item.available = available;
        }
    }
}

impl Default for ItemService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemServiceTrait for ItemService {
    /// 登録されたアイテムから取得
    async fn get_by_id(&self, item_id: ItemId) -> Result<Option<ItemRecord>> {
        Ok(self.items.lock().unwrap().get(&item_id).copied())
    }

    /// 所有者のアイテム一覧を返す
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<ItemRecord>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.owner_id == owner_id)
            .copied()
            .collect())
    }
}
