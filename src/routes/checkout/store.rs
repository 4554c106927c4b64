use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::CheckoutModel;
use super::schemas::{Checkout, CheckoutPatch, NewCheckout};

#[async_trait]
pub trait CheckoutStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Checkout>, anyhow::Error>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Checkout>, anyhow::Error>;
    async fn get_by_order_id(&self, order_id: &str) -> Result<Option<Checkout>, anyhow::Error>;
    async fn create(&self, checkout: &NewCheckout) -> Result<Checkout, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        patch: &CheckoutPatch,
    ) -> Result<Option<Checkout>, anyhow::Error>;
}

pub struct PgCheckoutStore {
    pool: PgPool,
}

impl PgCheckoutStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckoutStore for PgCheckoutStore {
    #[tracing::instrument(name = "Fetch checkout list", skip(self))]
    async fn get_all(&self) -> Result<Vec<Checkout>, anyhow::Error> {
        let rows = sqlx::query_as::<_, CheckoutModel>(
            r#"SELECT id, order_id, payment_id, payment_code, status, created_at, updated_at
            FROM checkout ORDER BY created_at"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching checkouts")
        })?;
        Ok(rows.into_iter().map(|row| row.into_schema()).collect())
    }

    #[tracing::instrument(name = "Fetch checkout by id", skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Checkout>, anyhow::Error> {
        let row = sqlx::query_as::<_, CheckoutModel>(
            r#"SELECT id, order_id, payment_id, payment_code, status, created_at, updated_at
            FROM checkout WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching the checkout")
        })?;
        Ok(row.map(|row| row.into_schema()))
    }

    #[tracing::instrument(name = "Fetch checkout by order id", skip(self))]
    async fn get_by_order_id(&self, order_id: &str) -> Result<Option<Checkout>, anyhow::Error> {
        let row = sqlx::query_as::<_, CheckoutModel>(
            r#"SELECT id, order_id, payment_id, payment_code, status, created_at, updated_at
            FROM checkout WHERE order_id = $1"#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while fetching the checkout")
        })?;
        Ok(row.map(|row| row.into_schema()))
    }

    #[tracing::instrument(name = "Save checkout", skip(self))]
    async fn create(&self, checkout: &NewCheckout) -> Result<Checkout, anyhow::Error> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, CheckoutModel>(
            r#"INSERT INTO checkout (id, order_id, payment_id, payment_code, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_id, payment_id, payment_code, status, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&checkout.order_id)
        .bind(&checkout.payment_id)
        .bind(&checkout.payment_code)
        .bind(checkout.status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while saving the checkout")
        })?;
        Ok(row.into_schema())
    }

    #[tracing::instrument(name = "Update checkout", skip(self))]
    async fn update(
        &self,
        id: Uuid,
        patch: &CheckoutPatch,
    ) -> Result<Option<Checkout>, anyhow::Error> {
        let row = sqlx::query_as::<_, CheckoutModel>(
            r#"UPDATE checkout SET
                payment_id = COALESCE($2, payment_id),
                payment_code = COALESCE($3, payment_code),
                status = COALESCE($4, status),
                updated_at = $5
            WHERE id = $1
            RETURNING id, order_id, payment_id, payment_code, status, created_at, updated_at"#,
        )
        .bind(id)
        .bind(patch.payment_id.as_deref())
        .bind(patch.payment_code.as_deref())
        .bind(patch.status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            anyhow::Error::new(e).context("A database failure occurred while updating the checkout")
        })?;
        Ok(row.map(|row| row.into_schema()))
    }
}
