use actix_web::web;

use super::handlers::health_check;

pub fn util_route(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check));
}
