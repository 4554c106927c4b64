use actix_web::web;

use super::handlers::{get_checkout_by_order, list_checkouts, payment_status_update};

pub fn checkout_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_checkouts)));
    cfg.service(web::resource("/notification").route(web::post().to(payment_status_update)));
    cfg.service(web::resource("/{order_id}").route(web::get().to(get_checkout_by_order)));
}
