use crate::domain::{self, booking::BookingStatus, commands::*, value_objects::*};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub user_service: Arc<dyn UserService>,
    pub item_service: Arc<dyn ItemService>,
    pub booking_store: Arc<dyn BookingStore>,
}

/// ユーザーの存在を検証するヘルパー関数
///
/// すべての予約操作の冒頭で呼ばれる。
pub(super) async fn ensure_user_exists(
    user_service: &Arc<dyn UserService>,
    user_id: UserId,
) -> Result<()> {
    let exists = user_service
        .exists(user_id)
        .await
        .map_err(BookingApplicationError::UserServiceError)?;

    if !exists {
        return Err(BookingApplicationError::UserNotFound(user_id.value()));
    }
    Ok(())
}

/// アイテムを解決するヘルパー関数
pub(super) async fn load_item(
    item_service: &Arc<dyn ItemService>,
    item_id: ItemId,
) -> Result<ItemRecord> {
    item_service
        .get_by_id(item_id)
        .await
        .map_err(BookingApplicationError::ItemServiceError)?
        .ok_or(BookingApplicationError::ItemNotFound(item_id.value()))
}

/// 予約を解決するヘルパー関数
async fn load_booking(
    booking_store: &Arc<dyn BookingStore>,
    booking_id: BookingId,
) -> Result<domain::Booking> {
    booking_store
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?
        .ok_or(BookingApplicationError::BookingNotFound(booking_id.value()))
}

/// 予約を作成する
///
/// ビジネスルール：
/// - 予約者が存在すること
/// - アイテムが存在すること
/// - 自分のアイテムは予約できないこと
/// - アイテムが貸出可能であること
///
/// 成功時はWaitingステータスの予約を1件永続化して返す。
/// ストアへの書き込みは1回。
pub async fn create_booking(
    deps: &ServiceDependencies,
    cmd: CreateBooking,
) -> Result<domain::Booking> {
    // 1. 予約者の存在確認
    ensure_user_exists(&deps.user_service, cmd.booker_id).await?;

    // 2. アイテムの解決
    let item = load_item(&deps.item_service, cmd.item_id).await?;

    // 3. 自己予約の禁止
    if item.owner_id == cmd.booker_id {
        return Err(BookingApplicationError::SelfBookingForbidden);
    }

    // 4. 貸出可否確認
    if !item.available {
        return Err(BookingApplicationError::ItemUnavailable(cmd.item_id.value()));
    }

    // 5. ドメイン層の純粋関数で予約を生成し、ストアに保存
    let booking =
        domain::booking::request_booking(cmd.item_id, cmd.booker_id, cmd.period, cmd.requested_at);

    deps.booking_store
        .save(booking)
        .await
        .map_err(BookingApplicationError::BookingStoreError)
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 操作ユーザーが存在すること
/// - 予約が存在すること
/// - 操作ユーザーが予約対象アイテムの所有者であること
/// - 予約がWaiting状態であること（Approved / Rejectedは終端）
///
/// 永続化はストアのcompare-and-swapで行う。並行する二重承認の敗者は
/// 更新に失敗し、その時点の永続ステータスを読み直してエラーに載せる。
pub async fn update_status(
    deps: &ServiceDependencies,
    cmd: DecideBooking,
) -> Result<domain::Booking> {
    // 1. 操作ユーザーの存在確認
    ensure_user_exists(&deps.user_service, cmd.owner_id).await?;

    // 2. 予約の解決
    let booking = load_booking(&deps.booking_store, cmd.booking_id).await?;

    // 3. 所有者確認
    let item = load_item(&deps.item_service, booking.item_id).await?;
    if item.owner_id != cmd.owner_id {
        return Err(BookingApplicationError::Forbidden {
            user_id: cmd.owner_id.value(),
            booking_id: cmd.booking_id.value(),
        });
    }

    // 4. ドメイン層で遷移を検証（読み取りコピーに対する早期チェック）
    let decided =
        domain::booking::decide(&booking, cmd.approve, cmd.decided_at).map_err(|e| match e {
            domain::errors::TransitionError::AlreadyDecided(current) => {
                BookingApplicationError::InvalidStateTransition(current)
            }
        })?;

    // 5. compare-and-swapで永続化
    let updated = deps
        .booking_store
        .update_status_if(
            cmd.booking_id,
            BookingStatus::Waiting,
            decided.status,
            cmd.decided_at,
        )
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    match updated {
        Some(booking) => Ok(booking),
        // レースに敗れた場合：永続値を読み直して現在のステータスを報告する
        None => {
            let current = load_booking(&deps.booking_store, cmd.booking_id).await?;
            Err(BookingApplicationError::InvalidStateTransition(
                current.status.as_str(),
            ))
        }
    }
}

/// 予約を取得する
///
/// ビジネスルール：
/// - 操作ユーザーが存在すること
/// - 予約が存在すること
/// - 予約者本人またはアイテム所有者のみ参照可能。
///   それ以外にはnot-foundとして報告する。
pub async fn get_booking(
    deps: &ServiceDependencies,
    user_id: UserId,
    booking_id: BookingId,
) -> Result<domain::Booking> {
    ensure_user_exists(&deps.user_service, user_id).await?;

    let booking = load_booking(&deps.booking_store, booking_id).await?;
    let item = load_item(&deps.item_service, booking.item_id).await?;

    if user_id != booking.booker_id && user_id != item.owner_id {
        return Err(BookingApplicationError::BookingNotVisible {
            booking_id: booking_id.value(),
            user_id: user_id.value(),
        });
    }

    Ok(booking)
}
