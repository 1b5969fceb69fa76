//! Direct edits to a user's balance and saving goal.

use axum::extract::State;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    db::begin_immediate,
    extract::{Path, Query},
    money,
    user::{UserID, get_user_by_id, update_balance, update_saving},
};

/// Add `amount` to the user's balance. `amount` may be negative.
///
/// Returns the new balance.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist or
/// [Error::AmountOutOfRange] if the new balance would overflow.
pub fn add_to_balance(
    user_id: UserID,
    amount: Decimal,
    connection: &Connection,
) -> Result<Decimal, Error> {
    let transaction = begin_immediate(connection)?;
    let user = get_user_by_id(user_id, &transaction)?;
    let new_balance = money::add(user.balance, amount)?;

    update_balance(user_id, new_balance, &transaction)?;
    transaction.commit()?;

    tracing::info!("added {amount} to the balance of user {user_id}, balance is now {new_balance}");

    Ok(new_balance)
}

/// Overwrite the user's balance.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist.
pub fn set_balance(
    user_id: UserID,
    balance: Decimal,
    connection: &Connection,
) -> Result<Decimal, Error> {
    update_balance(user_id, balance, connection)?;
    tracing::info!("set the balance of user {user_id} to {balance}");

    Ok(balance)
}

/// Overwrite the user's saving goal.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist.
pub fn set_saving(
    user_id: UserID,
    saving: Decimal,
    connection: &Connection,
) -> Result<Decimal, Error> {
    update_saving(user_id, saving, connection)?;
    tracing::info!("set the saving goal of user {user_id} to {saving}");

    Ok(saving)
}

/// The query string for [add_to_balance_endpoint].
#[derive(Debug, Clone, Deserialize)]
pub struct AmountQuery {
    /// The amount to add.
    pub amount: Decimal,
}

/// The query string for [set_balance_endpoint].
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceQuery {
    /// The new balance.
    pub balance: Decimal,
}

/// The query string for [set_saving_endpoint].
#[derive(Debug, Clone, Deserialize)]
pub struct SavingQuery {
    /// The new saving goal.
    pub saving: Decimal,
}

/// Handle adding to a user's balance.
pub async fn add_to_balance_endpoint(
    Path(user_id): Path<UserID>,
    Query(query): Query<AmountQuery>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Decimal>, Error> {
    let connection = state.db_connection.lock()?;
    let balance = add_to_balance(user_id, query.amount, &connection)?;

    Ok(ApiResponse::success("Balance updated", balance))
}

/// Handle overwriting a user's balance.
pub async fn set_balance_endpoint(
    Path(user_id): Path<UserID>,
    Query(query): Query<BalanceQuery>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Decimal>, Error> {
    let connection = state.db_connection.lock()?;
    let balance = set_balance(user_id, query.balance, &connection)?;

    Ok(ApiResponse::success("Balance updated", balance))
}

/// Handle overwriting a user's saving goal.
pub async fn set_saving_endpoint(
    Path(user_id): Path<UserID>,
    Query(query): Query<SavingQuery>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Decimal>, Error> {
    let connection = state.db_connection.lock()?;
    let saving = set_saving(user_id, query.saving, &connection)?;

    Ok(ApiResponse::success("Saving goal updated", saving))
}
