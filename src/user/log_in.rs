//! Checking a user's credentials.

use axum::extract::State;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    extract::Json,
    user::{User, get_user_by_email},
};

/// The credentials submitted when logging in.
#[derive(Debug, Clone, Deserialize)]
pub struct LogInForm {
    /// The email address the user registered with.
    pub email: String,
    /// The user's credential.
    pub password: String,
}

/// Get the user registered with `email` if `password` is their credential.
///
/// Surrounding whitespace in `email` is ignored, as it is at registration.
///
/// # Errors
/// Returns [Error::InvalidCredentials] when the email is unknown or the
/// password is wrong, without saying which.
pub fn log_in(email: &str, password: &str, connection: &Connection) -> Result<User, Error> {
    match get_user_by_email(email.trim(), connection)? {
        Some(user) if user.password.matches(password) => Ok(user),
        _ => Err(Error::InvalidCredentials),
    }
}

/// Handle a log in request.
pub async fn log_in_endpoint(
    State(state): State<DbState>,
    Json(form): Json<LogInForm>,
) -> Result<ApiResponse<User>, Error> {
    let connection = state.db_connection.lock()?;
    let user = log_in(&form.email, &form.password, &connection)?;

    tracing::debug!("user {} logged in", user.id);

    Ok(ApiResponse::success("Login successful", user))
}
