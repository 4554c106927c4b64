use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum GatewayError {
    #[error("Failed to reach the payment gateway")]
    TransportError(#[from] reqwest::Error),
    #[error("Payment gateway returned {0}: {1}")]
    RemoteError(StatusCode, String),
    #[error("Failed to parse payment gateway response: {0}")]
    InvalidResponse(String),
}

impl std::fmt::Debug for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: String,
    pub customer_id: i64,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub order_id: String,
    pub status: PaymentStatus,
    pub qr_code: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create(&self, request: &PaymentRequest) -> Result<PaymentRecord, GatewayError>;
    async fn get_by_args(&self, payment_id: &str) -> Result<Option<PaymentRecord>, GatewayError>;
}

#[derive(Debug, Serialize)]
struct MercadoPagoPaymentBody<'a> {
    payment_method_id: &'a str,
    transaction_amount: &'a BigDecimal,
    metadata: MercadoPagoMetadataBody<'a>,
    payer: MercadoPagoPayerBody,
}

#[derive(Debug, Serialize)]
struct MercadoPagoMetadataBody<'a> {
    order_id: &'a str,
}

#[derive(Debug, Serialize)]
struct MercadoPagoPayerBody {
    id: String,
}

#[derive(Debug, Deserialize)]
pub struct MercadoPagoPaymentData {
    pub id: i64,
    pub status: PaymentStatus,
    pub metadata: MercadoPagoMetadata,
    pub point_of_interaction: Option<MercadoPagoPointOfInteraction>,
}

#[derive(Debug, Deserialize)]
pub struct MercadoPagoMetadata {
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MercadoPagoPointOfInteraction {
    pub transaction_data: Option<MercadoPagoTransactionData>,
}

#[derive(Debug, Deserialize)]
pub struct MercadoPagoTransactionData {
    pub qr_code: Option<String>,
}

impl MercadoPagoPaymentData {
    pub fn into_record(self) -> PaymentRecord {
        let qr_code = self
            .point_of_interaction
            .and_then(|poi| poi.transaction_data)
            .and_then(|data| data.qr_code);
        PaymentRecord {
            id: self.id.to_string(),
            order_id: self.metadata.order_id,
            status: self.status,
            qr_code,
        }
    }
}

#[derive(Debug)]
pub struct MercadoPagoClient {
    http_client: Client,
    base_url: String,
    authorization_token: SecretString,
}

impl MercadoPagoClient {
    #[tracing::instrument]
    pub fn new(
        base_url: String,
        authorization_token: SecretString,
        timeout: std::time::Duration,
    ) -> Self {
        tracing::info!("Establishing connection to the payment gateway.");
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            base_url,
            authorization_token,
        }
    }

    fn get_auth_token(&self) -> String {
        format!("Bearer {}", self.authorization_token.expose_secret())
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoClient {
    #[tracing::instrument(name = "Create payment", skip(self), fields(order_id = %request.order_id))]
    async fn create(&self, request: &PaymentRequest) -> Result<PaymentRecord, GatewayError> {
        let url = format!("{}/v1/payments", self.base_url);
        let request_body = MercadoPagoPaymentBody {
            payment_method_id: "pix",
            transaction_amount: &request.amount,
            metadata: MercadoPagoMetadataBody {
                order_id: &request.order_id,
            },
            payer: MercadoPagoPayerBody {
                id: request.customer_id.to_string(),
            },
        };

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.get_auth_token())
            .header("X-Idempotency-Key", Uuid::new_v4().to_string())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::RemoteError(status, message));
        }
        let payment_data: MercadoPagoPaymentData = response
            .json()
            .await
            .map_err(|err| GatewayError::InvalidResponse(err.to_string()))?;
        Ok(payment_data.into_record())
    }

    #[tracing::instrument(name = "Fetch payment", skip(self))]
    async fn get_by_args(&self, payment_id: &str) -> Result<Option<PaymentRecord>, GatewayError> {
        let url = format!("{}/v1/payments/{}", self.base_url, payment_id);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.get_auth_token())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::RemoteError(status, message));
        }
        let payment_data: MercadoPagoPaymentData = response
            .json()
            .await
            .map_err(|err| GatewayError::InvalidResponse(err.to_string()))?;
        // Lookups never carry the QR payload.
        Ok(Some(PaymentRecord {
            qr_code: None,
            ..payment_data.into_record()
        }))
    }
}
