use std::fmt;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::models::MovieId;

/// Failure of a call against the hosted catalog table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store answered {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    #[error("could not decode store response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("store returned no rows")]
    EmptyResponse,
    #[error("store is unavailable")]
    Unavailable,
}

/// Failure of the local key-value settings storage.
#[derive(Debug, thiserror::Error)]
#[error("settings storage: {0}")]
pub struct StorageError(#[from] sea_orm::DbErr);

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all required fields!")]
    MissingRequiredFields,
    #[error("Password must be at least 6 characters!")]
    PasswordTooShort,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoreOp {
    Fetch,
    Add,
    Update,
    Delete,
    Featured,
    Trending,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreOp::Fetch => "fetch",
            StoreOp::Add => "add",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
            StoreOp::Featured => "toggle featured",
            StoreOp::Trending => "toggle trending",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid admin password")]
    InvalidPassword,
    #[error("no movie with id {0}")]
    UnknownMovie(MovieId),
    #[error("{op} failed: {source}")]
    Remote {
        op: StoreOp,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AdminError {
    pub fn remote(op: StoreOp) -> impl FnOnce(StoreError) -> Self {
        move |source| AdminError::Remote { op, source }
    }

    /// Text for the transient notice shown to the admin.
    pub fn notice_message(&self) -> String {
        match self {
            AdminError::Validation(v) => v.to_string(),
            AdminError::InvalidPassword => "Invalid password!".to_string(),
            AdminError::UnknownMovie(_) => "Movie not found!".to_string(),
            AdminError::Remote { op, .. } => match op {
                StoreOp::Fetch => "Failed to fetch movies!",
                StoreOp::Add => "Failed to add movie!",
                StoreOp::Update => "Failed to update movie!",
                StoreOp::Delete => "Failed to delete movie!",
                StoreOp::Featured => "Failed to update featured status!",
                StoreOp::Trending => "Failed to update trending status!",
            }
            .to_string(),
            AdminError::Storage(_) => "Failed to save password!".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    source: anyhow::Error,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        let status = match &err {
            AdminError::UnknownMovie(_) => StatusCode::NOT_FOUND,
            AdminError::Validation(_) | AdminError::InvalidPassword => StatusCode::BAD_REQUEST,
            AdminError::Remote { .. } => StatusCode::BAD_GATEWAY,
            AdminError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, source: anyhow::Error::new(err) }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = crate::templates::error_page(self.to_string());
        (self.status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
