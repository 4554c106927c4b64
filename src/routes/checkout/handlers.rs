use actix_web::web;
use utoipa::TupleUnit;

use crate::configuration::SqsConfig;
use crate::errors::GenericError;
use crate::payment_client::PaymentGateway;
use crate::schemas::GenericResponse;
use crate::sqs_client::QueueService;

use super::schemas::{CheckoutData, NotificationOutcome, PaymentNotificationRequest};
use super::store::CheckoutStore;
use super::utils::handle_payment_notification;

#[utoipa::path(
    get,
    path = "/checkout",
    tag = "Checkout Fetch Request",
    responses(
        (status=200, description= "Checkout List", body= GenericResponse<Vec<CheckoutData>>),
    )
)]
#[tracing::instrument(name = "list checkouts", skip(store))]
pub async fn list_checkouts(
    store: web::Data<dyn CheckoutStore>,
) -> Result<web::Json<GenericResponse<Vec<CheckoutData>>>, GenericError> {
    let checkouts = match store.get_all().await {
        Ok(checkouts) => checkouts,
        Err(e) => {
            return Err(GenericError::DatabaseError(
                "Something went wrong while fetching checkouts".to_string(),
                e,
            ));
        }
    };
    let data = checkouts.into_iter().map(CheckoutData::from).collect();
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched checkouts",
        Some(data),
    )))
}

#[utoipa::path(
    get,
    path = "/checkout/{order_id}",
    tag = "Checkout Fetch Request",
    params(
        ("order_id" = String, Path, description = "Order Id"),
    ),
    responses(
        (status=200, description= "Checkout Detail", body= GenericResponse<CheckoutData>),
        (status=404, description= "Checkout not found", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "fetch checkout", skip(store))]
pub async fn get_checkout_by_order(
    path: web::Path<String>,
    store: web::Data<dyn CheckoutStore>,
) -> Result<web::Json<GenericResponse<CheckoutData>>, GenericError> {
    let order_id = path.into_inner();
    match store.get_by_order_id(&order_id).await {
        Ok(Some(checkout)) => Ok(web::Json(GenericResponse::success(
            "Successfully fetched checkout",
            Some(CheckoutData::from(checkout)),
        ))),
        Ok(None) => Err(GenericError::DataNotFound("Checkout not found".to_string())),
        Err(e) => Err(GenericError::DatabaseError(
            "Something went wrong while fetching the checkout".to_string(),
            e,
        )),
    }
}

#[utoipa::path(
    post,
    path = "/checkout/notification",
    tag = "Checkout Status Update Request",
    request_body(content = PaymentNotificationRequest, description = "Request Body"),
    responses(
        (status=200, description= "Checkout Status Update Request", body= GenericResponse<CheckoutData>),
        (status=404, description= "Payment or Checkout not found", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "checkout status update", skip(gateway, store, queue, sqs_obj, body), fields(action=body.action.to_string(), payment_id=body.data.id.to_string()))]
pub async fn payment_status_update(
    body: PaymentNotificationRequest,
    gateway: web::Data<dyn PaymentGateway>,
    store: web::Data<dyn CheckoutStore>,
    queue: web::Data<dyn QueueService>,
    sqs_obj: web::Data<SqsConfig>,
) -> Result<web::Json<GenericResponse<CheckoutData>>, GenericError> {
    let outcome = handle_payment_notification(
        gateway.get_ref(),
        store.get_ref(),
        queue.get_ref(),
        &sqs_obj.payment_completed_queue_url,
        &body,
    )
    .await?;
    match outcome {
        NotificationOutcome::Processed(checkout) => Ok(web::Json(GenericResponse::success(
            "Successfully updated checkout status",
            Some(CheckoutData::from(checkout)),
        ))),
        NotificationOutcome::Ignored(action) => Ok(web::Json(GenericResponse::success(
            &format!("Ignored notification with action {}", action),
            None,
        ))),
    }
}
