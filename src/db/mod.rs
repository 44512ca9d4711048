use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::*;

// ── Schema ────────────────────────────────────────────────────────────────────

/// Applies the embedded migrations. Every statement is `IF NOT EXISTS`, so this
/// also succeeds against a database whose `products` table predates the
/// migration bookkeeping.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// ── Health ────────────────────────────────────────────────────────────────────

/// Opens a fresh connection outside the pool and closes it again.
pub async fn ping(options: &PgConnectOptions) -> AppResult<()> {
    let conn: PgConnection = options.connect().await.map_err(AppError::Unhealthy)?;
    conn.close().await.map_err(AppError::Unhealthy)?;
    Ok(())
}

// ── Products ──────────────────────────────────────────────────────────────────

pub async fn fetch_all_products(pool: &PgPool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, price, quantity, created_at FROM products ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Inserts the product and returns the id the database assigned. `price` and
/// `quantity` are sent as text and cast by Postgres, so values it can't
/// convert (or that overflow the column) come back as a database error.
pub async fn insert_product(pool: &PgPool, product: &NewProduct) -> AppResult<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO products (name, price, quantity)
        VALUES ($1, CAST($2 AS NUMERIC), CAST(CAST($3 AS NUMERIC) AS INTEGER))
        RETURNING id
        "#,
    )
    .bind(&product.name)
    .bind(product.price_text())
    .bind(product.quantity_text())
    .fetch_one(pool)
    .await?;

    Ok(id)
}
