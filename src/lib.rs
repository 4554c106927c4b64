//! src/lib.rs
pub mod commands;
pub mod configuration;
pub mod database;
pub mod errors;
pub mod migration;
pub mod openapi;
pub mod payment_client;
pub mod routes;
pub mod schemas;
pub mod sqs_client;
pub mod startup;
pub mod telemetry;
pub mod tests;
pub mod utils;
