//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MISSING_TITLE_OR_AUTHOR: &str = "Missing title or author";
pub const MISSING_UPDATE_FIELD: &str = "At least one field (title or author) must be provided";

/// Book record held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Identifier assigned by the store, never reused
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = "Frank Herbert")]
    pub author: String,
}

/// Create book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(
        required(message = "Missing title or author"),
        length(min = 1, message = "Missing title or author")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Missing title or author"),
        length(min = 1, message = "Missing title or author")
    )]
    pub author: Option<String>,
}

/// Update book request. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_fields"))]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl CreateBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }
}

impl UpdateBook {
    /// New title, if one was given
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// New author, if one was given
    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn validate_update_fields(data: &UpdateBook) -> Result<(), ValidationError> {
    if data.title().is_none() && data.author().is_none() {
        let mut error = ValidationError::new("missing_field");
        error.message = Some(MISSING_UPDATE_FIELD.into());
        return Err(error);
    }
    Ok(())
}
