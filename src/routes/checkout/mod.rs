pub(crate) mod errors;
pub mod handlers;
pub mod listener;
pub mod models;
mod routes;
pub mod schemas;
pub mod store;
pub mod utils;
pub use routes::checkout_route;
