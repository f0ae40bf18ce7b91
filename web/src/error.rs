use std::convert::From;

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use db::{DbError, ErrorKind};

use crate::responder::ApiResponse;

/// Error type for the web application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("There was an error with the blocking thread pool. Cause: {}", cause)]
    Blocking { cause: String },

    #[error("Invalid value '{}' for {}.", value, name)]
    Config { name: String, value: String },

    #[error(transparent)]
    Db(#[from] DbError),

    /// A query string, path or body that could not be extracted.
    #[error("{0}")]
    Malformed(String),

    #[error("Resource not found.")]
    NoRoute,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Db(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Malformed(_) => StatusCode::BAD_REQUEST,
            Error::NoRoute => StatusCode::NOT_FOUND,
            Error::Blocking { .. } | Error::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error to display as JSON
#[derive(Error, Debug)]
#[error("Error: {0}")]
pub struct JsonError(pub Error);

impl From<Error> for JsonError {
    fn from(e: Error) -> Self {
        JsonError(e)
    }
}

impl From<DbError> for JsonError {
    fn from(e: DbError) -> Self {
        JsonError(Error::Db(e))
    }
}

impl From<BlockingError> for JsonError {
    fn from(e: BlockingError) -> Self {
        JsonError(Error::Blocking {
            cause: e.to_string(),
        })
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Unhandled: {}", &self.0);
        }
        HttpResponse::build(status).json(ApiResponse::<()>::error(&self.0))
    }
}
