//! Order repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use photo_kiosk_core::{OrderNumber, OrderStatus, PhotoId};

use super::RepositoryError;
use crate::models::Order;

const ORDER_COLUMNS: &str = "order_number, session_id, photo_count, currency, \
     price_per_photo_cents, total_cents, store_name, receipt_footer, status, \
     created_at, printed_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an order and its photo membership in one transaction.
    ///
    /// `photo_ids` must already be in receipt order; positions are assigned
    /// from the slice index.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// persisted in that case.
    pub async fn create(
        &self,
        order: &Order,
        photo_ids: &[PhotoId],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        ))
        .bind(&order.order_number)
        .bind(&order.session_id)
        .bind(order.photo_count)
        .bind(order.currency)
        .bind(order.price_per_photo_cents)
        .bind(order.total_cents)
        .bind(&order.store_name)
        .bind(&order.receipt_footer)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.printed_at)
        .execute(&mut *tx)
        .await?;

        for (position, photo_id) in photo_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_photos (order_number, photo_id, position) \
                 VALUES (?1, ?2, ?3)",
            )
            .bind(&order.order_number)
            .bind(photo_id)
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetch an order by its receipt number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        order_number: &OrderNumber,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = ?1",
        ))
        .bind(order_number)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Mark an order printed, stamping `printed_at` with `now`.
    ///
    /// Re-marking an already-printed order refreshes the timestamp; the
    /// kiosk fires this on every `afterprint` event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist,
    /// `RepositoryError::Database` for query failures.
    pub async fn mark_printed(
        &self,
        order_number: &OrderNumber,
        now: DateTime<Utc>,
    ) -> Result<Order, RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders SET status = ?1, printed_at = ?2 WHERE order_number = ?3",
        )
        .bind(OrderStatus::Printed)
        .bind(now)
        .bind(order_number)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(order_number)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use photo_kiosk_core::CurrencyCode;

    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::{PhotoRepository, SessionRepository};
    use crate::db::photos::tests::seed_photos;

    #[tokio::test]
    async fn test_create_get_and_mark_printed() {
        let pool = memory_pool().await;
        let session = SessionRepository::new(&pool)
            .create(Utc::now())
            .await
            .unwrap();
        let photos = seed_photos(&pool, &session, 3).await;

        let order = Order {
            order_number: OrderNumber::generate(),
            session_id: session.session_id.clone(),
            photo_count: 3,
            currency: CurrencyCode::USD,
            price_per_photo_cents: 250,
            total_cents: 750,
            store_name: "Photo Kiosk".to_owned(),
            receipt_footer: "Pay at the counter.".to_owned(),
            status: OrderStatus::PendingPrint,
            created_at: Utc::now(),
            printed_at: None,
        };

        let photo_ids: Vec<_> = photos.iter().map(|p| p.photo_id.clone()).collect();
        let repo = OrderRepository::new(&pool);
        repo.create(&order, &photo_ids).await.unwrap();

        let fetched = repo.get(&order.order_number).await.unwrap().unwrap();
        assert_eq!(fetched.photo_count, 3);
        assert_eq!(fetched.total_cents, 750);
        assert_eq!(fetched.status, OrderStatus::PendingPrint);
        assert!(fetched.printed_at.is_none());

        // Photo membership keeps upload order.
        let members = PhotoRepository::new(&pool)
            .list_for_order(&order.order_number)
            .await
            .unwrap();
        let member_ids: Vec<_> = members.iter().map(|p| p.photo_id.clone()).collect();
        assert_eq!(member_ids, photo_ids);

        let printed = repo
            .mark_printed(&order.order_number, Utc::now())
            .await
            .unwrap();
        assert_eq!(printed.status, OrderStatus::Printed);
        assert!(printed.printed_at.is_some());
    }

    #[tokio::test]
    async fn test_mark_printed_unknown_order() {
        let pool = memory_pool().await;
        let repo = OrderRepository::new(&pool);

        let err = repo
            .mark_printed(&OrderNumber::new("PK-00000000000000-FFFFFF"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
