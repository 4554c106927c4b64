use crate::configuration::get_configuration;
use crate::database::configure_database_using_sqlx;

#[tracing::instrument(name = "Migrate using Sqlx")]
pub async fn run_migrations() {
    let configuration = get_configuration().expect("Failed to read configuration.");
    configure_database_using_sqlx(&configuration.database).await;
}
