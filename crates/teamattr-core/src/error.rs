use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::schema::ValidationError;

/// Errors returned by attribute operations
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The acting user may not manage this team's attributes
    #[error("You are not allowed to manage attributes of this team")]
    Unauthorized,

    /// The session names a user that does not exist
    #[error("Unknown user: {0}")]
    Unauthenticated(Uuid),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Could not encode options: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A stored row could not be decoded
    #[error("Attribute {id} is malformed: {reason}")]
    Corrupt { id: i32, reason: String },
}

impl AttributeError {
    pub fn team_not_found(team_id: i32) -> Self {
        AttributeError::NotFound(format!("Team {}", team_id))
    }

    pub fn attribute_not_found(attribute_id: i32) -> Self {
        AttributeError::NotFound(format!("Attribute {}", attribute_id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AttributeError::NotFound(_))
    }
}
