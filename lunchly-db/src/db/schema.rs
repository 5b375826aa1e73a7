//! Table creation for customers and reservations

use sqlx::PgPool;

use crate::error::DbResult;

/// Create the customers and reservations tables if they don't exist.
pub async fn run(pool: &PgPool) -> DbResult<()> {
    tracing::info!("Running lunchly schema setup...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id SERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone TEXT,
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id SERIAL PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES customers(id),
            start_at TIMESTAMP NOT NULL,
            num_guests INTEGER NOT NULL,
            notes TEXT,
            CONSTRAINT fewer_than_one_guest CHECK (num_guests > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_reservations_customer_id ON reservations(customer_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Lunchly schema ready");
    Ok(())
}
