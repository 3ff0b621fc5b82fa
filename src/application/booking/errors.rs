use thiserror::Error;
use uuid::Uuid;

/// 予約管理アプリケーション層のエラー
///
/// すべて終端・再試行不可。呼び出し側へ安定した種別とメッセージを
/// そのまま返す。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// ユーザーが存在しない
    #[error("user with id={0} not found")]
    UserNotFound(Uuid),

    /// アイテムが存在しない
    #[error("item with id={0} not found")]
    ItemNotFound(Uuid),

    /// 予約が見つからない
    #[error("booking with id={0} not found")]
    BookingNotFound(Uuid),

    /// 予約者でも所有者でもないユーザーからの参照
    ///
    /// 呼び出し側にはnot-foundとして報告される。
    #[error("booking with id={booking_id} not found for user with id={user_id}")]
    BookingNotVisible { booking_id: Uuid, user_id: Uuid },

    /// 自分のアイテムは予約できない
    #[error("cannot book own item")]
    SelfBookingForbidden,

    /// アイテムが貸出不可
    #[error("item with id={0} is not available")]
    ItemUnavailable(Uuid),

    /// 対象予約に対する権限がない
    #[error("user with id={user_id} cannot change status of booking with id={booking_id}")]
    Forbidden { user_id: Uuid, booking_id: Uuid },

    /// ステータスが既に終端（例: Waitingを期待したがApprovedだった）
    #[error("cannot change booking status. current status {0}")]
    InvalidStateTransition(&'static str),

    /// 不正なカテゴリ文字列
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// コメント資格なし（完了済みの承認予約が存在しない）
    #[error("user with id={user_id} has never completed a booking of item with id={item_id}")]
    CommentNotAllowed { user_id: Uuid, item_id: Uuid },

    /// UserServiceのエラー
    #[error("user service error")]
    UserServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemServiceのエラー
    #[error("item service error")]
    ItemServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookingStoreのエラー
    #[error("booking store error")]
    BookingStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
