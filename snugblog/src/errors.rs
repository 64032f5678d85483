use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by the store and the service layer.
#[derive(Debug, Error)]
pub enum SocialError {
    /// Validation failed for one or more form fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// Underlying Redis command failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Referenced post, user or message does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: Cow<'static, str>, id: String },

    /// The acting user lacks the rights for this action.
    #[error("forbidden: {reason}")]
    Forbidden { reason: Cow<'static, str> },

    /// Unique constraint violation - the value already belongs to another user.
    #[error("unique constraint violation: field '{field}' already used by entity {existing_entity_id}")]
    UniqueConstraintViolation { field: String, existing_entity_id: String },

    #[error("{message}")]
    Other { message: Cow<'static, str> },
}

impl SocialError {
    pub fn not_found(entity: impl Into<Cow<'static, str>>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn forbidden(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden { reason: reason.into() }
    }

    pub fn other(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Other { message: message.into() }
    }

    /// HTTP status a web boundary should abort with.
    pub fn status_code(&self) -> u16 {
        match self {
            SocialError::NotFound { .. } => 404,
            SocialError::Forbidden { .. } => 403,
            SocialError::Validation(_) | SocialError::UniqueConstraintViolation { .. } => 422,
            SocialError::Redis(_) | SocialError::Other { .. } => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SocialError::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, SocialError::Forbidden { .. })
    }
}

/// Collection of validation issues encountered while checking a form.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the first issue reported for `field`, if any.
    pub fn issue_for(&self, field: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }
}

/// Detailed validation failure for a single field.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub type SocialResult<T> = Result<T, SocialError>;
