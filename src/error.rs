//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api_response::ApiResponse;

/// The broad classes of failure an operation can report.
///
/// HTTP handlers use the kind to pick a status code, callers of the core
/// functions can use it to decide whether a failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input.
    Validation,
    /// A referenced user, category or expense does not exist.
    NotFound,
    /// The request clashes with existing data.
    Conflict,
    /// The caller may not perform the operation.
    Authorization,
    /// The storage layer failed in a way that is not otherwise classified.
    Storage,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An expense amount was zero or negative.
    #[error("amount must be greater than 0")]
    InvalidAmount,

    /// Applying an amount would take a balance or total outside the range
    /// of representable amounts.
    #[error("amount is out of range")]
    AmountOutOfRange,

    /// The request body, query string or path could not be deserialized.
    ///
    /// Holds the reason given by the extractor.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A date string could not be parsed as `yyyy-MM-dd`.
    #[error("invalid date \"{0}\", use yyyy-MM-dd")]
    InvalidDate(String),

    /// A month token could not be parsed as `yyyy-MM`.
    #[error("invalid month format, expected 'yyyy-MM', got: '{0}'")]
    InvalidMonthFormat(String),

    /// The category name was blank or the owning user ID was missing.
    #[error("invalid category data")]
    InvalidCategoryData,

    /// A registration field was blank.
    ///
    /// Holds the name of the offending field.
    #[error("{0} cannot be empty")]
    InvalidUserData(&'static str),

    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows. The domain
    /// functions translate it into one of the more specific variants below
    /// before handing it to a caller.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The user ID does not refer to a registered user.
    #[error("user not found")]
    UserNotFound,

    /// The category ID does not refer to an existing category.
    #[error("category not found")]
    CategoryNotFound,

    /// The expense ID does not refer to an existing expense.
    #[error("expense not found")]
    ExpenseNotFound,

    /// The user already has a category with this name (ignoring case).
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// The email address is registered to another user.
    #[error("email already registered")]
    DuplicateEmail,

    /// The username is registered to another user.
    #[error("username already taken")]
    DuplicateUsername,

    /// Tried to delete a category that expenses still refer to.
    #[error("the category is still used by one or more expenses")]
    CategoryInUse,

    /// Tried to modify a default category or a category owned by someone
    /// else, or an expense owned by someone else.
    #[error("not allowed to modify this resource")]
    NotAllowed,

    /// The email and password do not match a registered user.
    ///
    /// Deliberately does not say which of the two was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl Error {
    /// The class of failure this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidAmount
            | Error::AmountOutOfRange
            | Error::InvalidRequest(_)
            | Error::InvalidDate(_)
            | Error::InvalidMonthFormat(_)
            | Error::InvalidCategoryData
            | Error::InvalidUserData(_) => ErrorKind::Validation,
            Error::NotFound
            | Error::UserNotFound
            | Error::CategoryNotFound
            | Error::ExpenseNotFound => ErrorKind::NotFound,
            Error::DuplicateCategory(_)
            | Error::DuplicateEmail
            | Error::DuplicateUsername
            | Error::CategoryInUse => ErrorKind::Conflict,
            Error::NotAllowed | Error::InvalidCredentials => ErrorKind::Authorization,
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezone(_) => {
                ErrorKind::Storage
            }
        }
    }

    /// Replace a generic [Error::NotFound] with a more specific error.
    ///
    /// Other errors are passed through unchanged.
    pub(crate) fn or_not_found(self, specific: Error) -> Error {
        match self {
            Error::NotFound => specific,
            error => error,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                Some(ref desc),
            ) if desc.ends_with("user.email") => Error::DuplicateEmail,
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                Some(ref desc),
            ) if desc.ends_with("user.username") => Error::DuplicateUsername,
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(error: std::sync::PoisonError<T>) -> Self {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match (self.kind(), &self) {
            (_, Error::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            (ErrorKind::Validation, _) => StatusCode::BAD_REQUEST,
            (ErrorKind::NotFound, _) => StatusCode::NOT_FOUND,
            (ErrorKind::Conflict, _) => StatusCode::CONFLICT,
            (ErrorKind::Authorization, _) => StatusCode::FORBIDDEN,
            (ErrorKind::Storage, _) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self.kind() {
            // Storage errors are not intended to be shown to the client.
            ErrorKind::Storage => {
                tracing::error!("An unexpected error occurred: {}", self);
                "Something went wrong".to_owned()
            }
            _ => self.to_string(),
        };

        (status_code, ApiResponse::<()>::failure(message)).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{Error, ErrorKind};

    #[test]
    fn classifies_variants() {
        assert_eq!(Error::InvalidAmount.kind(), ErrorKind::Validation);
        assert_eq!(Error::AmountOutOfRange.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::InvalidMonthFormat("abc".to_owned()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::CategoryNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::DuplicateCategory("Food".to_owned()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(Error::NotAllowed.kind(), ErrorKind::Authorization);
        assert_eq!(Error::DatabaseLockError.kind(), ErrorKind::Storage);
    }

    #[test]
    fn or_not_found_only_replaces_not_found() {
        assert_eq!(
            Error::NotFound.or_not_found(Error::UserNotFound),
            Error::UserNotFound
        );
        assert_eq!(
            Error::InvalidAmount.or_not_found(Error::UserNotFound),
            Error::InvalidAmount
        );
    }

    #[test]
    fn maps_kinds_to_status_codes() {
        let cases = [
            (Error::InvalidAmount, StatusCode::BAD_REQUEST),
            (Error::AmountOutOfRange, StatusCode::BAD_REQUEST),
            (Error::InvalidRequest("bad".to_owned()), StatusCode::BAD_REQUEST),
            (Error::UserNotFound, StatusCode::NOT_FOUND),
            (Error::DuplicateEmail, StatusCode::CONFLICT),
            (Error::NotAllowed, StatusCode::FORBIDDEN),
            (Error::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, want_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), want_status);
        }
    }
}
