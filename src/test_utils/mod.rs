#![allow(missing_docs)]

pub(crate) mod http;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rust_decimal_macros::dec;

use crate::{
    app_state::DbState,
    calendar::parse_date,
    database_id::CategoryId,
    db::initialize,
    expense::{Expense, NewExpense, create_expense},
    user::{NewUser, Password, User, UserID, create_user},
};

pub(crate) use http::{get_test_server, parse_api_response};

/// An in-memory database with every table created.
#[track_caller]
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

#[track_caller]
pub(crate) fn get_test_db_state() -> DbState {
    DbState {
        db_connection: Arc::new(Mutex::new(get_test_connection())),
    }
}

/// Insert a user called `username` with the email `{username}@x.com` and
/// the password "hunter2". Does not provision categories.
#[track_caller]
pub(crate) fn create_test_user(username: &str, connection: &Connection) -> User {
    create_user(
        &NewUser {
            username: username.to_owned(),
            email: format!("{username}@x.com"),
            password: Password::new("hunter2"),
        },
        connection,
    )
    .expect("Could not create test user")
}

/// Insert a 10.00 expense dated `date` without touching the user's balance.
#[track_caller]
pub(crate) fn create_test_expense(
    user_id: UserID,
    category_id: CategoryId,
    date: &str,
    connection: &Connection,
) -> Expense {
    create_expense(
        NewExpense {
            user_id,
            category_id,
            amount: dec!(10),
            description: "Test expense".to_owned(),
            date: parse_date(date).expect("Invalid test date"),
        },
        connection,
    )
    .expect("Could not create test expense")
}
