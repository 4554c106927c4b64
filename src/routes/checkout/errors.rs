use uuid::Uuid;

use crate::errors::GenericError;
use crate::payment_client::GatewayError;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ProcessOrderError {
    #[error("Failed to decode order created event: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error(transparent)]
    GatewayError(#[from] GatewayError),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
}

impl std::fmt::Debug for ProcessOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum UpdateCheckoutStatusError {
    #[error("{0} not found")]
    NotFoundError(String),
    #[error("Failed to update {0} with id {1}")]
    UpdateFailedError(String, Uuid),
    #[error(transparent)]
    GatewayError(#[from] GatewayError),
    #[error("{0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UpdateCheckoutStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<UpdateCheckoutStatusError> for GenericError {
    fn from(err: UpdateCheckoutStatusError) -> GenericError {
        match err {
            UpdateCheckoutStatusError::NotFoundError(entity) => {
                GenericError::DataNotFound(format!("{} not found", entity))
            }
            UpdateCheckoutStatusError::UpdateFailedError(entity, id) => {
                GenericError::UnexpectedCustomError(format!(
                    "Failed to update {} with id {}",
                    entity, id
                ))
            }
            UpdateCheckoutStatusError::GatewayError(error) => {
                GenericError::UnexpectedError(anyhow::Error::new(error))
            }
            UpdateCheckoutStatusError::SerializationError(error) => {
                GenericError::SerializationError(error.to_string())
            }
            UpdateCheckoutStatusError::DatabaseError(message, error) => {
                GenericError::DatabaseError(message, error)
            }
            UpdateCheckoutStatusError::UnexpectedError(error) => {
                GenericError::UnexpectedError(error)
            }
        }
    }
}
