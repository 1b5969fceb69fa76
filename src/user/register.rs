//! Registering a new user and giving them their starting categories.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    category::provision_within_transaction,
    db::begin_immediate,
    extract::Json,
    user::{NewUser, Password, User, create_user, get_user_by_email, get_user_by_username},
};

/// The details submitted when registering.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    /// The unique name of the user.
    #[serde(default)]
    pub username: String,
    /// The unique email address of the user.
    #[serde(default)]
    pub email: String,
    /// The user's credential.
    #[serde(default)]
    pub password: String,
}

/// Register a user with a balance and saving goal of zero and a private copy
/// of every default category.
///
/// The user and their categories are written in one transaction, so a
/// failure while copying the categories also undoes the registration.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidUserData] if any field is blank,
/// - [Error::DuplicateEmail] if the email is already registered,
/// - [Error::DuplicateUsername] if the username is already taken,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn register_user(form: RegistrationForm, connection: &Connection) -> Result<User, Error> {
    let username = form.username.trim();
    let email = form.email.trim();

    if username.is_empty() {
        return Err(Error::InvalidUserData("username"));
    }

    if email.is_empty() {
        return Err(Error::InvalidUserData("email"));
    }

    if form.password.trim().is_empty() {
        return Err(Error::InvalidUserData("password"));
    }

    let transaction = begin_immediate(connection)?;

    if get_user_by_email(email, &transaction)?.is_some() {
        return Err(Error::DuplicateEmail);
    }

    if get_user_by_username(username, &transaction)?.is_some() {
        return Err(Error::DuplicateUsername);
    }

    let user = create_user(
        &NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
            password: Password::new(&form.password),
        },
        &transaction,
    )?;
    let categories = provision_within_transaction(user.id, &transaction)?;
    transaction.commit()?;

    tracing::info!(
        "registered user {} with {} default categories",
        user.id,
        categories.len()
    );

    Ok(user)
}

/// Handle a registration request.
pub async fn register_user_endpoint(
    State(state): State<DbState>,
    Json(form): Json<RegistrationForm>,
) -> Result<Response, Error> {
    let connection = state.db_connection.lock()?;
    let user = register_user(form, &connection)?;
    let message = format!(
        "User {} registered successfully with email {}!",
        user.username, user.email
    );

    Ok((StatusCode::CREATED, ApiResponse::success(&message, user)).into_response())
}

#[cfg(test)]
mod register_user_tests {
    use rust_decimal::Decimal;

    use crate::{
        Error,
        category::{DefaultCategories, get_categories_by_user, seed_default_categories},
        test_utils::get_test_connection,
        user::{RegistrationForm, count_users, get_user_by_email, register_user},
    };

    fn form(username: &str, email: &str, password: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn registers_user_with_zero_balance_and_default_categories() {
        let connection = get_test_connection();
        seed_default_categories(&DefaultCategories::standard(), &connection).unwrap();

        let user = register_user(form("alice", "a@x.com", "pw"), &connection).unwrap();

        assert_eq!(user.balance, Decimal::ZERO);
        assert_eq!(user.saving, Decimal::ZERO);
        let categories = get_categories_by_user(user.id, &connection).unwrap();
        assert_eq!(categories.len(), 7);
        assert!(
            categories
                .iter()
                .all(|category| !category.is_default && category.user_id == Some(user.id))
        );
    }

    #[test]
    fn rejects_blank_fields() {
        let connection = get_test_connection();

        assert_eq!(
            register_user(form(" ", "a@x.com", "pw"), &connection),
            Err(Error::InvalidUserData("username"))
        );
        assert_eq!(
            register_user(form("alice", "", "pw"), &connection),
            Err(Error::InvalidUserData("email"))
        );
        assert_eq!(
            register_user(form("alice", "a@x.com", ""), &connection),
            Err(Error::InvalidUserData("password"))
        );
        assert_eq!(count_users(&connection), Ok(0));
    }

    #[test]
    fn rejects_taken_email_before_taken_username() {
        let connection = get_test_connection();
        register_user(form("alice", "a@x.com", "pw"), &connection).unwrap();

        assert_eq!(
            register_user(form("alice", "a@x.com", "pw"), &connection),
            Err(Error::DuplicateEmail)
        );
        assert_eq!(
            register_user(form("alice", "b@x.com", "pw"), &connection),
            Err(Error::DuplicateUsername)
        );
        assert_eq!(get_user_by_email("b@x.com", &connection), Ok(None));
    }
}
