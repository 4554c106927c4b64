use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Deserialize)]
pub struct QueueMessage {
    #[serde(rename = "MessageId")]
    pub id: String,
    #[serde(rename = "ReceiptHandle")]
    pub receipt_handle: String,
    #[serde(rename = "Body")]
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct ReceiveMessageResponse {
    #[serde(rename = "Messages", default)]
    messages: Vec<QueueMessage>,
}

#[async_trait]
pub trait QueueService: Send + Sync {
    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<QueueMessage>, anyhow::Error>;
    async fn delete_message(
        &self,
        queue_url: &str,
        receipt_handle: &str,
    ) -> Result<(), anyhow::Error>;
    async fn send_message(
        &self,
        queue_url: &str,
        group_id: &str,
        body: &str,
    ) -> Result<(), anyhow::Error>;
}

/// Speaks the SQS JSON protocol directly so a local broker like ElasticMQ
/// can stand in for the real service without request signing.
#[derive(Debug)]
pub struct SqsClient {
    http_client: Client,
    endpoint: String,
    max_messages: u16,
}

impl SqsClient {
    #[tracing::instrument]
    pub fn new(endpoint: String, max_messages: u16, timeout: std::time::Duration) -> Self {
        tracing::info!("Establishing connection to the queue endpoint.");
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            endpoint,
            max_messages,
        }
    }

    async fn call(
        &self,
        target: &str,
        payload: &serde_json::Value,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("X-Amz-Target", format!("AmazonSQS.{}", target))
            .header("Content-Type", "application/x-amz-json-1.0")
            .json(payload)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("Failed to reach the queue endpoint: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Queue endpoint returned {}: {}",
                status,
                message
            ));
        }
        Ok(response)
    }
}

#[async_trait]
impl QueueService for SqsClient {
    #[tracing::instrument(name = "Receive queue messages", skip(self))]
    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<QueueMessage>, anyhow::Error> {
        let payload = json!({
            "QueueUrl": queue_url,
            "MaxNumberOfMessages": self.max_messages,
        });
        let response = self.call("ReceiveMessage", &payload).await?;
        let response_body: ReceiveMessageResponse = response
            .json()
            .await
            .map_err(|err| anyhow::anyhow!("Failed to parse receive response: {}", err))?;
        Ok(response_body.messages)
    }

    #[tracing::instrument(name = "Delete queue message", skip(self, receipt_handle))]
    async fn delete_message(
        &self,
        queue_url: &str,
        receipt_handle: &str,
    ) -> Result<(), anyhow::Error> {
        let payload = json!({
            "QueueUrl": queue_url,
            "ReceiptHandle": receipt_handle,
        });
        self.call("DeleteMessage", &payload).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Send queue message", skip(self, body))]
    async fn send_message(
        &self,
        queue_url: &str,
        group_id: &str,
        body: &str,
    ) -> Result<(), anyhow::Error> {
        let payload = json!({
            "QueueUrl": queue_url,
            "MessageBody": body,
            "MessageGroupId": group_id,
            "MessageDeduplicationId": group_id,
        });
        self.call("SendMessage", &payload).await?;
        Ok(())
    }
}
