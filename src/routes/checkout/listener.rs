use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::payment_client::PaymentGateway;
use crate::sqs_client::{QueueMessage, QueueService};

use super::errors::ProcessOrderError;
use super::schemas::OrderCreatedEvent;
use super::store::CheckoutStore;
use super::utils::create_checkout_from_order;

/// Polls the order created queue on a fixed interval and turns each
/// message into a checkout. Cycles never overlap; the next poll starts
/// only after the previous batch is fully worked through.
pub struct OrderCreatedListener {
    queue: Arc<dyn QueueService>,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn CheckoutStore>,
    queue_url: String,
    poll_interval: Duration,
}

impl OrderCreatedListener {
    pub fn new(
        queue: Arc<dyn QueueService>,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn CheckoutStore>,
        queue_url: String,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            gateway,
            store,
            queue_url,
            poll_interval,
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("Listening for order created events on {}", self.queue_url);
        loop {
            if let Err(e) = self.tick().await {
                tracing::error!("Failed to poll the order created queue: {:?}", e);
            }
            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = shutdown.changed() => {
                    tracing::info!("Order created listener stopped");
                    break;
                }
            }
        }
    }

    /// One poll cycle: pull a batch, process each message on its own and
    /// acknowledge only the ones that made it all the way through.
    pub(crate) async fn tick(&self) -> Result<(), anyhow::Error> {
        let messages = self.queue.receive_messages(&self.queue_url).await?;
        for message in messages {
            match self.process_message(&message).await {
                Ok(()) => {
                    if let Err(e) = self
                        .queue
                        .delete_message(&self.queue_url, &message.receipt_handle)
                        .await
                    {
                        tracing::error!("Failed to delete message {}: {:?}", message.id, e);
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to process message {}: {:?}", message.id, e);
                }
            }
        }
        Ok(())
    }

    #[tracing::instrument(name = "Process order created message", skip(self, message), fields(message_id = %message.id))]
    async fn process_message(&self, message: &QueueMessage) -> Result<(), ProcessOrderError> {
        tracing::info!("Received message: {}", message.body);
        let event: OrderCreatedEvent = serde_json::from_str(&message.body)?;
        create_checkout_from_order(self.gateway.as_ref(), self.store.as_ref(), &event).await?;
        Ok(())
    }
}
