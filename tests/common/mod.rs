use chrono::{DateTime, Utc};
use rusty_share_ddd::adapters::mock::{ItemService as MockItemService, UserService as MockUserService};
use rusty_share_ddd::application::booking::ServiceDependencies;
use rusty_share_ddd::domain::booking::{Booking, BookingCategory, BookingStatus};
use rusty_share_ddd::domain::value_objects::{BookingId, ItemId, Page, UserId};
use rusty_share_ddd::ports::booking_store;
use rusty_share_ddd::ports::booking_store::BookingStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// インメモリBookingStore実装
///
/// ポート契約（start降順の整列、ページネーション、単一nowに対する
/// カテゴリ述語、原子的なステータス更新）をMutex下で満たす。
pub struct InMemoryBookingStore {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

/// start降順に整列してページでスライスする
fn sort_and_slice(mut bookings: Vec<Booking>, page: Page) -> Vec<Booking> {
    bookings.sort_by(|a, b| b.start().cmp(&a.start()));
    bookings
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

#[async_trait::async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn save(&self, booking: Booking) -> booking_store::Result<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        bookings.insert(booking.booking_id, booking.clone());
        Ok(booking)
    }

    async fn get_by_id(&self, booking_id: BookingId) -> booking_store::Result<Option<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.get(&booking_id).cloned())
    }

    async fn update_status_if(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> booking_store::Result<Option<Booking>> {
        // ロック下で比較と更新を行い、原子性を保証する
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&booking_id) {
            Some(booking) if booking.status == expected => {
                booking.status = next;
                booking.updated_at = updated_at;
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_for_booker(
        &self,
        booker_id: UserId,
        category: BookingCategory,
        now: DateTime<Utc>,
        page: Page,
    ) -> booking_store::Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        let matched = bookings
            .values()
            .filter(|b| b.booker_id == booker_id)
            .filter(|b| category.matches(b, now))
            .cloned()
            .collect();
        Ok(sort_and_slice(matched, page))
    }

    async fn find_for_items(
        &self,
        item_ids: &[ItemId],
        category: BookingCategory,
        now: DateTime<Utc>,
        page: Page,
    ) -> booking_store::Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        let matched = bookings
            .values()
            .filter(|b| item_ids.contains(&b.item_id))
            .filter(|b| category.matches(b, now))
            .cloned()
            .collect();
        Ok(sort_and_slice(matched, page))
    }

    async fn find_by_item(&self, item_id: ItemId) -> booking_store::Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .values()
            .filter(|b| b.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        status: BookingStatus,
    ) -> booking_store::Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .values()
            .filter(|b| b.item_id == item_id && b.booker_id == booker_id && b.status == status)
            .cloned()
            .collect())
    }
}

/// テスト用の依存関係一式を構築する
///
/// モックのゲートウェイとインメモリストアを返す。ハンドルは
/// テストデータの登録・検査に使用する。
pub fn setup_deps() -> (
    ServiceDependencies,
    Arc<MockUserService>,
    Arc<MockItemService>,
    Arc<InMemoryBookingStore>,
) {
    let user_service = Arc::new(MockUserService::new());
    let item_service = Arc::new(MockItemService::new());
    let booking_store = Arc::new(InMemoryBookingStore::new());

    let deps = ServiceDependencies {
        user_service: user_service.clone(),
        item_service: item_service.clone(),
        booking_store: booking_store.clone(),
    };

    (deps, user_service, item_service, booking_store)
}
