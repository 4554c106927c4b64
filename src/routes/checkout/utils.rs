use crate::payment_client::{PaymentGateway, PaymentRequest};
use crate::sqs_client::QueueService;

use super::errors::{ProcessOrderError, UpdateCheckoutStatusError};
use super::schemas::{
    Checkout, CheckoutStatus, CheckoutUpdatedEvent, NewCheckout, NotificationOutcome,
    OrderCreatedEvent, PaymentNotificationRequest,
};
use super::store::CheckoutStore;

/// Creates the payment at the gateway and then persists the checkout.
/// If the gateway call fails nothing is persisted; if the insert fails
/// the payment already exists at the gateway and the caller decides
/// whether the event gets retried.
#[tracing::instrument(
    name = "Create checkout from order",
    skip(gateway, store),
    fields(order_id = %event.order_id)
)]
pub async fn create_checkout_from_order(
    gateway: &dyn PaymentGateway,
    store: &dyn CheckoutStore,
    event: &OrderCreatedEvent,
) -> Result<Checkout, ProcessOrderError> {
    let request = PaymentRequest {
        order_id: event.order_id.clone(),
        customer_id: event.customer_id,
        amount: event.amount.clone(),
    };
    let payment = gateway.create(&request).await?;
    let new_checkout = NewCheckout::create_instance(
        event.order_id.clone(),
        payment.id,
        payment.qr_code.unwrap_or_default(),
    );
    let checkout = store.create(&new_checkout).await.map_err(|e| {
        ProcessOrderError::DatabaseError("Failed to save the checkout".to_string(), e)
    })?;
    tracing::info!(
        "Created checkout {} for order {}",
        checkout.id,
        checkout.order_id
    );
    Ok(checkout)
}

/// Resolves the payment at the gateway, applies the resulting status to
/// the matching checkout and notifies the outbound queue. A payment
/// status that settles nothing leaves the checkout untouched.
#[tracing::instrument(
    name = "Update checkout status",
    skip(gateway, store, queue, notification_queue_url)
)]
pub async fn update_checkout_status(
    gateway: &dyn PaymentGateway,
    store: &dyn CheckoutStore,
    queue: &dyn QueueService,
    notification_queue_url: &str,
    payment_id: &str,
) -> Result<Checkout, UpdateCheckoutStatusError> {
    let payment = gateway
        .get_by_args(payment_id)
        .await?
        .ok_or_else(|| UpdateCheckoutStatusError::NotFoundError("Payment".to_string()))?;

    let mut checkout = store
        .get_by_order_id(&payment.order_id)
        .await
        .map_err(|e| {
            UpdateCheckoutStatusError::DatabaseError("Failed to fetch the checkout".to_string(), e)
        })?
        .ok_or_else(|| UpdateCheckoutStatusError::NotFoundError("Checkout".to_string()))?;

    let new_status = match CheckoutStatus::transition_for(&payment.status) {
        Some(status) => status,
        None => {
            tracing::info!(
                "Payment {} reported status {:?}; checkout {} left as is",
                payment_id,
                payment.status,
                checkout.id
            );
            return Ok(checkout);
        }
    };

    checkout.apply_status(new_status);
    let updated = store
        .update(checkout.id, &checkout.as_patch())
        .await
        .map_err(|e| {
            UpdateCheckoutStatusError::DatabaseError("Failed to update the checkout".to_string(), e)
        })?
        .ok_or(UpdateCheckoutStatusError::UpdateFailedError(
            "Checkout".to_string(),
            checkout.id,
        ))?;

    publish_checkout_updated(queue, notification_queue_url, &updated).await?;
    Ok(updated)
}

#[tracing::instrument(name = "Publish checkout updated", skip(queue, notification_queue_url))]
pub async fn publish_checkout_updated(
    queue: &dyn QueueService,
    notification_queue_url: &str,
    checkout: &Checkout,
) -> Result<(), UpdateCheckoutStatusError> {
    let event = CheckoutUpdatedEvent {
        order_id: checkout.order_id.clone(),
        checkout_status: checkout.status,
    };
    let body = serde_json::to_string(&event)?;
    queue
        .send_message(notification_queue_url, &event.group_key(), &body)
        .await
        .map_err(|e| {
            UpdateCheckoutStatusError::UnexpectedError(
                e.context("Failed to publish the checkout updated event"),
            )
        })?;
    tracing::info!("Published checkout update {}", event);
    Ok(())
}

/// Gateway webhook entry point. Anything other than a payment update is
/// acknowledged without touching the gateway or the store.
#[tracing::instrument(
    name = "Handle payment notification",
    skip(gateway, store, queue, notification_queue_url, request),
    fields(action = %request.action, payment_id = %request.data.id)
)]
pub async fn handle_payment_notification(
    gateway: &dyn PaymentGateway,
    store: &dyn CheckoutStore,
    queue: &dyn QueueService,
    notification_queue_url: &str,
    request: &PaymentNotificationRequest,
) -> Result<NotificationOutcome, UpdateCheckoutStatusError> {
    if !request.is_payment_update() {
        tracing::info!("Ignoring notification with action {}", request.action);
        return Ok(NotificationOutcome::Ignored(request.action.clone()));
    }
    let checkout = update_checkout_status(
        gateway,
        store,
        queue,
        notification_queue_url,
        &request.data.id,
    )
    .await?;
    Ok(NotificationOutcome::Processed(checkout))
}
