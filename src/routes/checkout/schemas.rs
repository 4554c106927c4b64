use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::GenericError;
use crate::payment_client::PaymentStatus;
use crate::utils::fmt_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "checkout_status")]
pub enum CheckoutStatus {
    WaitingPayment,
    Paid,
    Refused,
}

impl CheckoutStatus {
    /// Maps a gateway payment status to the checkout status it settles,
    /// if it settles one at all.
    pub fn transition_for(payment_status: &PaymentStatus) -> Option<CheckoutStatus> {
        match payment_status {
            PaymentStatus::Approved => Some(CheckoutStatus::Paid),
            PaymentStatus::Rejected => Some(CheckoutStatus::Refused),
            PaymentStatus::Pending | PaymentStatus::Unknown => None,
        }
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Checkout {
    pub id: Uuid,
    pub order_id: String,
    pub payment_id: String,
    pub payment_code: String,
    pub status: CheckoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Checkout {
    pub fn apply_status(&mut self, new_status: CheckoutStatus) {
        self.status = new_status;
    }

    /// The order id is never part of the patch; it is fixed at creation.
    pub fn as_patch(&self) -> CheckoutPatch {
        CheckoutPatch {
            payment_id: Some(self.payment_id.clone()),
            payment_code: Some(self.payment_code.clone()),
            status: Some(self.status),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCheckout {
    pub order_id: String,
    pub payment_id: String,
    pub payment_code: String,
    pub status: CheckoutStatus,
}

impl NewCheckout {
    pub fn create_instance(order_id: String, payment_id: String, payment_code: String) -> Self {
        Self {
            order_id,
            payment_id,
            payment_code,
            status: CheckoutStatus::WaitingPayment,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutPatch {
    pub payment_id: Option<String>,
    pub payment_code: Option<String>,
    pub status: Option<CheckoutStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedEvent {
    pub order_id: String,
    pub customer_id: i64,
    pub amount: BigDecimal,
}

impl std::fmt::Display for OrderCreatedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_json(self, f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutUpdatedEvent {
    pub order_id: String,
    pub checkout_status: CheckoutStatus,
}

impl CheckoutUpdatedEvent {
    /// Group and deduplication key for the outbound queue.
    pub fn group_key(&self) -> String {
        format!("checkout-{}", self.order_id)
    }
}

impl std::fmt::Display for CheckoutUpdatedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_json(self, f)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentNotificationRequest {
    pub action: String,
    pub data: PaymentNotificationData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentNotificationData {
    pub id: String,
}

impl PaymentNotificationRequest {
    pub fn is_payment_update(&self) -> bool {
        self.action == "payment.updated"
    }
}

impl FromRequest for PaymentNotificationRequest {
    type Error = GenericError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = web::Json::<Self>::from_request(req, payload);

        Box::pin(async move {
            match fut.await {
                Ok(json) => Ok(json.into_inner()),
                Err(e) => Err(GenericError::ValidationError(e.to_string())),
            }
        })
    }
}

#[derive(Debug)]
pub enum NotificationOutcome {
    Processed(Checkout),
    Ignored(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub id: Uuid,
    pub order_id: String,
    pub payment_id: String,
    pub payment_code: String,
    pub status: CheckoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Checkout> for CheckoutData {
    fn from(checkout: Checkout) -> Self {
        Self {
            id: checkout.id,
            order_id: checkout.order_id,
            payment_id: checkout.payment_id,
            payment_code: checkout.payment_code,
            status: checkout.status,
            created_at: checkout.created_at,
            updated_at: checkout.updated_at,
        }
    }
}
