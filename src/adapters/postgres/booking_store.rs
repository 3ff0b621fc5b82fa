use crate::domain::booking::{Booking, BookingCategory, BookingStatus};
use crate::domain::value_objects::{BookingId, BookingPeriod, ItemId, Page, UserId};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;
use uuid::Uuid;

/// PostgreSQLの行データをBookingに変換する
///
/// データベースから取得した行を、ドメインの値オブジェクトとBookingに
/// 変換する。ステータス文字列のパースと期間の再構築で
/// エラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    let period = BookingPeriod::new(row.get("start_time"), row.get("end_time")).map_err(|_| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "persisted booking period has end before start",
        )) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Booking {
        booking_id: BookingId::from_uuid(row.get("booking_id")),
        item_id: ItemId::from_uuid(row.get("item_id")),
        booker_id: UserId::from_uuid(row.get("booker_id")),
        period,
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// BookingStoreのPostgreSQL実装
///
/// 一覧系クエリはすべて`start_time`降順で整列し、
/// LIMIT / OFFSETでページネーションする。
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 予約を保存（upsert）
    ///
    /// INSERT ... ON CONFLICT UPDATEを使用して冪等性を保証する。
    async fn save(&self, booking: Booking) -> Result<Booking> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                item_id,
                booker_id,
                start_time,
                end_time,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (booking_id)
            DO UPDATE SET
                item_id = EXCLUDED.item_id,
                booker_id = EXCLUDED.booker_id,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(booking.booking_id.value())
        .bind(booking.item_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.start())
        .bind(booking.end())
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    /// IDで予約を取得
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT
                booking_id,
                item_id,
                booker_id,
                start_time,
                end_time,
                status,
                created_at,
                updated_at
            FROM bookings
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// ステータスを条件付きで更新（compare-and-swap）
    ///
    /// WHERE句でステータスの期待値まで比較することで、
    /// 読み書き間の競合をデータベースの原子的UPDATEに畳み込む。
    /// 一致しなければ0行更新となりNoneを返す。
    async fn update_status_if(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $3, updated_at = $4
            WHERE booking_id = $1 AND status = $2
            RETURNING
                booking_id,
                item_id,
                booker_id,
                start_time,
                end_time,
                status,
                created_at,
                updated_at
            "#,
        )
        .bind(booking_id.value())
        .bind(expected.as_str())
        .bind(next.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// 予約者の予約をカテゴリで絞り込んで取得
    ///
    /// (booker_id, start_time)のインデックスを使用してパフォーマンスを
    /// 最適化。時間述語は渡された`now`に対して評価する。
    async fn find_for_booker(
        &self,
        booker_id: UserId,
        category: BookingCategory,
        now: DateTime<Utc>,
        page: Page,
    ) -> Result<Vec<Booking>> {
        let limit = page.limit() as i64;
        let offset = page.offset() as i64;

        let rows = match category {
            BookingCategory::All => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE booker_id = $1
                    ORDER BY start_time DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(booker_id.value())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Current => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE booker_id = $1 AND start_time <= $2 AND end_time >= $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(now)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Past => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE booker_id = $1 AND end_time < $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(now)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Future => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE booker_id = $1 AND start_time > $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(now)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Waiting | BookingCategory::Rejected => {
                let status = if category == BookingCategory::Waiting {
                    BookingStatus::Waiting
                } else {
                    BookingStatus::Rejected
                };
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE booker_id = $1 AND status = $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(map_row_to_booking).collect()
    }

    /// アイテム集合に属する予約をカテゴリで絞り込んで取得
    ///
    /// `item_id = ANY($1)`で集合照合する。空の集合には空を返す。
    async fn find_for_items(
        &self,
        item_ids: &[ItemId],
        category: BookingCategory,
        now: DateTime<Utc>,
        page: Page,
    ) -> Result<Vec<Booking>> {
        let ids: Vec<Uuid> = item_ids.iter().map(|id| id.value()).collect();
        let limit = page.limit() as i64;
        let offset = page.offset() as i64;

        let rows = match category {
            BookingCategory::All => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE item_id = ANY($1)
                    ORDER BY start_time DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(&ids)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Current => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE item_id = ANY($1) AND start_time <= $2 AND end_time >= $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(&ids)
                .bind(now)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Past => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE item_id = ANY($1) AND end_time < $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(&ids)
                .bind(now)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Future => {
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE item_id = ANY($1) AND start_time > $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(&ids)
                .bind(now)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            BookingCategory::Waiting | BookingCategory::Rejected => {
                let status = if category == BookingCategory::Waiting {
                    BookingStatus::Waiting
                } else {
                    BookingStatus::Rejected
                };
                sqlx::query(
                    r#"
                    SELECT
                        booking_id, item_id, booker_id, start_time, end_time,
                        status, created_at, updated_at
                    FROM bookings
                    WHERE item_id = ANY($1) AND status = $2
                    ORDER BY start_time DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(&ids)
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(map_row_to_booking).collect()
    }

    /// アイテムの全予約を取得（last/next導出用）
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id, item_id, booker_id, start_time, end_time,
                status, created_at, updated_at
            FROM bookings
            WHERE item_id = $1
            ORDER BY start_time DESC
            "#,
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// アイテム×予約者×ステータスで予約を取得（コメント資格判定用）
    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        status: BookingStatus,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id, item_id, booker_id, start_time, end_time,
                status, created_at, updated_at
            FROM bookings
            WHERE item_id = $1 AND booker_id = $2 AND status = $3
            ORDER BY start_time DESC
            "#,
        )
        .bind(item_id.value())
        .bind(booker_id.value())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}
