use chrono::{Duration, Utc};
use rusty_share_ddd::application::booking::{
    BookingApplicationError, list_for_booker, list_for_owner,
};
use rusty_share_ddd::domain::booking::{Booking, BookingCategory, BookingStatus};
use rusty_share_ddd::domain::value_objects::{BookingId, BookingPeriod, ItemId, Page, UserId};
use rusty_share_ddd::ports::booking_store::BookingStore;

mod common;

// ============================================================================
// テスト用のヘルパー関数
// ============================================================================

fn period_hours(from: i64, to: i64) -> BookingPeriod {
    let now = Utc::now();
    BookingPeriod::new(now + Duration::hours(from), now + Duration::hours(to)).unwrap()
}

async fn seed_booking(
    store: &common::InMemoryBookingStore,
    item_id: ItemId,
    booker_id: UserId,
    period: BookingPeriod,
    status: BookingStatus,
) -> Booking {
    let now = Utc::now();
    let booking = Booking {
        booking_id: BookingId::new(),
        item_id,
        booker_id,
        period,
        status,
        created_at: now,
        updated_at: now,
    };
    store.save(booking).await.unwrap()
}

fn page(number: u32, size: u32) -> Page {
    Page::new(number, size).unwrap()
}

fn ids(bookings: &[Booking]) -> Vec<BookingId> {
    bookings.iter().map(|b| b.booking_id).collect()
}

// ============================================================================
// 予約者視点の一覧のテスト
// ============================================================================

#[tokio::test]
async fn test_list_for_booker_requires_known_user() {
    let (deps, _, _, _) = common::setup_deps();

    let result = list_for_booker(&deps, UserId::new(), BookingCategory::All, page(0, 10)).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::UserNotFound(_)
    ));
}

#[tokio::test]
async fn test_list_for_booker_filters_by_category() {
    let (deps, user_service, _, store) = common::setup_deps();
    let booker = UserId::new();
    let item = ItemId::new();
    user_service.add_user(booker);

    let past =
        seed_booking(&store, item, booker, period_hours(-4, -2), BookingStatus::Approved).await;
    let current =
        seed_booking(&store, item, booker, period_hours(-1, 1), BookingStatus::Approved).await;
    let future_waiting =
        seed_booking(&store, item, booker, period_hours(2, 4), BookingStatus::Waiting).await;
    let future_rejected =
        seed_booking(&store, item, booker, period_hours(6, 8), BookingStatus::Rejected).await;

    // 他の予約者の予約は混ざらない
    seed_booking(&store, item, UserId::new(), period_hours(-4, 4), BookingStatus::Approved).await;

    let all = list_for_booker(&deps, booker, BookingCategory::All, page(0, 10))
        .await
        .unwrap();
    assert_eq!(all.len(), 4);

    let result = list_for_booker(&deps, booker, BookingCategory::Past, page(0, 10))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec![past.booking_id]);

    let result = list_for_booker(&deps, booker, BookingCategory::Current, page(0, 10))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec![current.booking_id]);

    let result = list_for_booker(&deps, booker, BookingCategory::Future, page(0, 10))
        .await
        .unwrap();
    assert_eq!(
        ids(&result),
        vec![future_rejected.booking_id, future_waiting.booking_id]
    );

    let result = list_for_booker(&deps, booker, BookingCategory::Waiting, page(0, 10))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec![future_waiting.booking_id]);

    let result = list_for_booker(&deps, booker, BookingCategory::Rejected, page(0, 10))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec![future_rejected.booking_id]);
}

#[tokio::test]
async fn test_list_for_booker_orders_by_start_descending() {
    let (deps, user_service, _, store) = common::setup_deps();
    let booker = UserId::new();
    let item = ItemId::new();
    user_service.add_user(booker);

    // 整列済みでない順序で投入する
    seed_booking(&store, item, booker, period_hours(2, 3), BookingStatus::Waiting).await;
    seed_booking(&store, item, booker, period_hours(-6, -5), BookingStatus::Approved).await;
    seed_booking(&store, item, booker, period_hours(10, 11), BookingStatus::Waiting).await;
    seed_booking(&store, item, booker, period_hours(-1, 1), BookingStatus::Approved).await;

    let all = list_for_booker(&deps, booker, BookingCategory::All, page(0, 10))
        .await
        .unwrap();

    assert_eq!(all.len(), 4);
    for pair in all.windows(2) {
        assert!(
            pair[0].start() >= pair[1].start(),
            "results must be non-increasing in start"
        );
    }
}

#[tokio::test]
async fn test_list_for_booker_paginates() {
    let (deps, user_service, _, store) = common::setup_deps();
    let booker = UserId::new();
    let item = ItemId::new();
    user_service.add_user(booker);

    for offset in 1..=5 {
        seed_booking(
            &store,
            item,
            booker,
            period_hours(offset, offset + 1),
            BookingStatus::Waiting,
        )
        .await;
    }

    let first = list_for_booker(&deps, booker, BookingCategory::All, page(0, 2))
        .await
        .unwrap();
    let second = list_for_booker(&deps, booker, BookingCategory::All, page(1, 2))
        .await
        .unwrap();
    let third = list_for_booker(&deps, booker, BookingCategory::All, page(2, 2))
        .await
        .unwrap();
    let beyond = list_for_booker(&deps, booker, BookingCategory::All, page(3, 2))
        .await
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(third.len(), 1);
    assert!(beyond.is_empty());

    // ページをまたいでも全体はstart降順のまま
    let stitched: Vec<_> = first.iter().chain(&second).chain(&third).collect();
    for pair in stitched.windows(2) {
        assert!(pair[0].start() >= pair[1].start());
    }
}

// ============================================================================
// 所有者視点の一覧のテスト
// ============================================================================

#[tokio::test]
async fn test_list_for_owner_requires_known_user() {
    let (deps, _, _, _) = common::setup_deps();

    let result = list_for_owner(&deps, UserId::new(), BookingCategory::All, page(0, 10)).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::UserNotFound(_)
    ));
}

#[tokio::test]
async fn test_list_for_owner_scopes_to_owned_items() {
    let (deps, user_service, item_service, store) = common::setup_deps();
    let owner = UserId::new();
    let other_owner = UserId::new();
    user_service.add_user(owner);

    let item_a = ItemId::new();
    let item_b = ItemId::new();
    let foreign_item = ItemId::new();
    item_service.add_item(item_a, owner, true);
    item_service.add_item(item_b, owner, true);
    item_service.add_item(foreign_item, other_owner, true);

    let on_a =
        seed_booking(&store, item_a, UserId::new(), period_hours(1, 2), BookingStatus::Waiting)
            .await;
    let on_b =
        seed_booking(&store, item_b, UserId::new(), period_hours(3, 4), BookingStatus::Approved)
            .await;
    // 他人のアイテムへの予約は含まれない
    seed_booking(
        &store,
        foreign_item,
        UserId::new(),
        period_hours(5, 6),
        BookingStatus::Waiting,
    )
    .await;

    let result = list_for_owner(&deps, owner, BookingCategory::All, page(0, 10))
        .await
        .unwrap();

    assert_eq!(ids(&result), vec![on_b.booking_id, on_a.booking_id]);
}

#[tokio::test]
async fn test_list_for_owner_filters_by_status_category() {
    let (deps, user_service, item_service, store) = common::setup_deps();
    let owner = UserId::new();
    user_service.add_user(owner);

    let item = ItemId::new();
    item_service.add_item(item, owner, true);

    let waiting =
        seed_booking(&store, item, UserId::new(), period_hours(1, 2), BookingStatus::Waiting)
            .await;
    let rejected =
        seed_booking(&store, item, UserId::new(), period_hours(3, 4), BookingStatus::Rejected)
            .await;
    seed_booking(&store, item, UserId::new(), period_hours(5, 6), BookingStatus::Approved).await;

    let result = list_for_owner(&deps, owner, BookingCategory::Waiting, page(0, 10))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec![waiting.booking_id]);

    let result = list_for_owner(&deps, owner, BookingCategory::Rejected, page(0, 10))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec![rejected.booking_id]);
}

#[tokio::test]
async fn test_list_for_owner_without_items_is_empty() {
    let (deps, user_service, _, store) = common::setup_deps();
    let owner = UserId::new();
    user_service.add_user(owner);

    // 無関係な予約が存在しても、所有アイテムがなければ空
    seed_booking(
        &store,
        ItemId::new(),
        UserId::new(),
        period_hours(1, 2),
        BookingStatus::Waiting,
    )
    .await;

    let result = list_for_owner(&deps, owner, BookingCategory::All, page(0, 10))
        .await
        .unwrap();
    assert!(result.is_empty());
}
