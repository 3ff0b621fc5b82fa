use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, create_booking as execute_create_booking,
    get_booking as execute_get_booking, list_for_booker, list_for_owner,
    update_status as execute_update_status,
};
use crate::domain::booking::BookingCategory;
use crate::domain::commands::DecideBooking;
use crate::domain::value_objects::{BookingId, Page};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    extract::SharerUserId,
    types::{BookingResponse, CreateBookingRequest, ListBookingsQuery, UpdateStatusQuery},
};

/// デフォルトのページサイズ
const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /bookings - 新しい予約を作成
///
/// 強制されるビジネスルール:
/// - 予約者が存在すること
/// - アイテムが存在すること
/// - 自分のアイテムは予約できないこと
/// - アイテムが貸出可能であること
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(booker_id): SharerUserId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let cmd = req
        .to_command(booker_id, chrono::Utc::now())
        .map_err(|_| ApiError::bad_request("end must be strictly after start"))?;

    let booking = execute_create_booking(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:id?approved=true|false - 予約を承認または却下
///
/// 強制されるビジネスルール:
/// - 操作ユーザーが対象アイテムの所有者であること
/// - 予約がWaiting状態であること（終端ステータスからの再遷移は不可）
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    SharerUserId(owner_id): SharerUserId,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<UpdateStatusQuery>,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = DecideBooking {
        owner_id,
        booking_id: BookingId::from_uuid(booking_id),
        approve: query.approved,
        decided_at: chrono::Utc::now(),
    };

    let booking = execute_update_status(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /bookings/:id - 予約詳細をIDで取得
///
/// 予約者本人またはアイテム所有者のみ参照可能。
/// それ以外には404を返す。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking =
        execute_get_booking(&state.service_deps, user_id, BookingId::from_uuid(booking_id)).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings - 予約者視点の予約一覧
///
/// クエリパラメータ:
/// - state: カテゴリでフィルタリング（デフォルトALL）
/// - page: 0始まりのページ番号（デフォルト0）
/// - size: ページサイズ（1以上、デフォルト10）
pub async fn list_booker_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let (category, page) = parse_listing_params(&query)?;

    let bookings = list_for_booker(&state.service_deps, user_id, category, page).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner - 所有者視点の予約一覧
///
/// 所有アイテムに対する他ユーザーの予約を返す。
/// クエリパラメータはGET /bookingsと同じ。
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(owner_id): SharerUserId,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let (category, page) = parse_listing_params(&query)?;

    let bookings = list_for_owner(&state.service_deps, owner_id, category, page).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// 一覧系クエリパラメータのパースとバリデーション
///
/// カテゴリ文字列はここで一度だけパースされ、以降は閉じた列挙型として
/// 扱われる。
fn parse_listing_params(query: &ListBookingsQuery) -> Result<(BookingCategory, Page), ApiError> {
    let category = query
        .state
        .as_deref()
        .unwrap_or("ALL")
        .parse::<BookingCategory>()
        .map_err(|e| ApiError::from(BookingApplicationError::UnknownState(e.0)))?;

    let page = Page::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map_err(|_| ApiError::bad_request("size must be at least 1"))?;

    Ok((category, page))
}
