//! PostgreSQL implementation of the event store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::EventStore;
use super::models::{EventRow, to_column};
use crate::config::ServiceConfig;
use crate::domain::{Event, EventDetails, EventId};
use crate::error::BookingError;

/// PostgreSQL-backed event store using `sqlx::PgPool`.
///
/// Bookings run in a transaction that takes a row lock with
/// `SELECT ... FOR UPDATE`, so concurrent bookings on one event queue up on
/// that row while other events stay unaffected.
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageUnavailable`] if the database cannot
    /// be reached.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, BookingError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageUnavailable`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), BookingError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BookingError::StorageUnavailable(format!("migration failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn list(&self) -> Result<Vec<Event>, BookingError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, name, description, date, location, total_capacity, booked_seats \
             FROM events ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn get(&self, id: EventId) -> Result<Event, BookingError> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, name, description, date, location, total_capacity, booked_seats \
             FROM events WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BookingError::EventNotFound(id))?;

        Event::try_from(row)
    }

    async fn insert(&self, details: EventDetails) -> Result<Event, BookingError> {
        let total_capacity = to_column(details.total_capacity, "totalCapacity")?;
        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO events (name, description, date, location, total_capacity, booked_seats) \
             VALUES ($1, $2, $3, $4, $5, 0) \
             RETURNING id, name, description, date, location, total_capacity, booked_seats",
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(details.date)
        .bind(&details.location)
        .bind(total_capacity)
        .fetch_one(&self.pool)
        .await?;

        Event::try_from(row)
    }

    async fn update(&self, id: EventId, details: EventDetails) -> Result<Event, BookingError> {
        let total_capacity = to_column(details.total_capacity, "totalCapacity")?;
        let row = sqlx::query_as::<_, EventRow>(
            "UPDATE events \
             SET name = $1, description = $2, date = $3, location = $4, total_capacity = $5 \
             WHERE id = $6 \
             RETURNING id, name, description, date, location, total_capacity, booked_seats",
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(details.date)
        .bind(&details.location)
        .bind(total_capacity)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BookingError::EventNotFound(id))?;

        Event::try_from(row)
    }

    async fn remove(&self, id: EventId) -> Result<(), BookingError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingError::EventNotFound(id));
        }
        Ok(())
    }

    async fn book_seats(&self, id: EventId, seats: u32) -> Result<Event, BookingError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, name, description, date, location, total_capacity, booked_seats \
             FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BookingError::EventNotFound(id))?;

        // An early return drops `tx`, which rolls back and releases the lock.
        let mut event = Event::try_from(row)?;
        event.reserve(seats)?;

        sqlx::query("UPDATE events SET booked_seats = $1 WHERE id = $2")
            .bind(to_column(event.booked_seats, "bookedSeats")?)
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(event)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    //! These tests need a live database; run them with
    //! `DATABASE_URL=... cargo test -- --ignored`.

    use std::sync::Arc;

    use super::*;
    use crate::domain::event::tests::details;

    async fn store() -> PostgresEventStore {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            panic!("DATABASE_URL must be set for postgres tests");
        };
        let Ok(pool) = PgPoolOptions::new().max_connections(4).connect(&url).await else {
            panic!("cannot connect to {url}");
        };
        let store = PostgresEventStore::new(pool);
        if let Err(e) = store.migrate().await {
            panic!("migration failed: {e}");
        }
        store
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn crud_round_trip() {
        let store = store().await;
        let Ok(created) = store.insert(details("Postgres fair", 50)).await else {
            panic!("insert failed");
        };
        assert_eq!(created.booked_seats, 0);

        assert!(store.book_seats(created.id, 10).await.is_ok());
        let Ok(updated) = store.update(created.id, details("Renamed fair", 50)).await else {
            panic!("update failed");
        };
        assert_eq!(updated.booked_seats, 10);

        assert!(store.remove(created.id).await.is_ok());
        assert!(matches!(
            store.get(created.id).await,
            Err(BookingError::EventNotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "requires DATABASE_URL"]
    async fn row_lock_prevents_overselling() {
        let store = Arc::new(store().await);
        let Ok(event) = store.insert(details("Contended", 10)).await else {
            panic!("insert failed");
        };

        let a = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.book_seats(event.id, 6).await }
        });
        let b = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.book_seats(event.id, 6).await }
        });
        let (Ok(a), Ok(b)) = (a.await, b.await) else {
            panic!("task panicked");
        };
        assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);

        let Ok(after) = store.get(event.id).await else {
            panic!("event missing");
        };
        assert_eq!(after.booked_seats, 6);
        let _ = store.remove(event.id).await;
    }
}
