use utoipa::{OpenApi, TupleUnit};

use crate::routes::checkout::handlers;
use crate::routes::checkout::schemas::{
    CheckoutData, CheckoutStatus, CheckoutUpdatedEvent, PaymentNotificationData,
    PaymentNotificationRequest,
};
use crate::schemas::GenericResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_checkouts,
        handlers::get_checkout_by_order,
        handlers::payment_status_update,
    ),
    components(schemas(
        CheckoutData,
        CheckoutStatus,
        CheckoutUpdatedEvent,
        PaymentNotificationRequest,
        PaymentNotificationData,
        GenericResponse<CheckoutData>,
        GenericResponse<Vec<CheckoutData>>,
        GenericResponse<TupleUnit>,
    )),
    tags(
        (name = "Checkout REST API", description = "Checkout Service API Endpoints")
    ),
)]

pub struct ApiDoc {}
