use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{Checkout, CheckoutStatus};

#[derive(Debug, FromRow)]
pub struct CheckoutModel {
    pub id: Uuid,
    pub order_id: String,
    pub payment_id: String,
    pub payment_code: String,
    pub status: CheckoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckoutModel {
    pub fn into_schema(self) -> Checkout {
        Checkout {
            id: self.id,
            order_id: self.order_id,
            payment_id: self.payment_id,
            payment_code: self.payment_code,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
