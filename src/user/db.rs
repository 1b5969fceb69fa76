//! Database operations for users.

use rusqlite::{Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    money::{get_decimal, to_sql_text},
    user::{NewUser, Password, User, UserID},
};

const SELECT_USER: &str = "SELECT id, username, email, password, balance, saving FROM user";

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                balance TEXT NOT NULL DEFAULT '0',
                saving TEXT NOT NULL DEFAULT '0'
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// New users start with a balance and saving goal of zero.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateEmail] if the email is already registered,
/// - [Error::DuplicateUsername] if the username is already registered,
/// - or [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(new_user: &NewUser, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (username, email, password) VALUES (?1, ?2, ?3)",
        (
            &new_user.username,
            &new_user.email,
            new_user.password.as_ref(),
        ),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username: new_user.username.clone(),
        email: new_user.email.clone(),
        password: new_user.password.clone(),
        balance: Decimal::ZERO,
        saving: Decimal::ZERO,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::UserNotFound] if `user_id` does not belong to a registered user,
/// - or [Error::SqlError] if there was some other SQL error.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE id = :id"))?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| Error::from(error).or_not_found(Error::UserNotFound))
}

/// Get the user registered with `email`, if any.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<Option<User>, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE email = :email"))?
        .query_row(&[(":email", email)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Get the user registered with `username`, if any.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_user_by_username(
    username: &str,
    connection: &Connection,
) -> Result<Option<User>, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE username = :username"))?
        .query_row(&[(":username", username)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Overwrite the balance of the user with `user_id`.
///
/// # Errors
///
/// Returns a [Error::UserNotFound] if the user does not exist or
/// [Error::SqlError] if an SQL related error occurred.
pub fn update_balance(
    user_id: UserID,
    balance: Decimal,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET balance = ?1 WHERE id = ?2",
        (to_sql_text(balance), user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::UserNotFound);
    }

    Ok(())
}

/// Overwrite the saving goal of the user with `user_id`.
///
/// # Errors
///
/// Returns a [Error::UserNotFound] if the user does not exist or
/// [Error::SqlError] if an SQL related error occurred.
pub fn update_saving(user_id: UserID, saving: Decimal, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET saving = ?1 WHERE id = ?2",
        (to_sql_text(saving), user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::UserNotFound);
    }

    Ok(())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_password: String = row.get(3)?;

    Ok(User {
        id: UserID::new(row.get(0)?),
        username: row.get(1)?,
        email: row.get(2)?,
        password: Password::new(&raw_password),
        balance: get_decimal(row, 4)?,
        saving: get_decimal(row, 5)?,
    })
}
