//! Listing a user's expenses, all-time or for one month.

use axum::extract::State;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    calendar::parse_month,
    expense::{CategorizedExpense, Expense, get_categorized_expenses_in_range, get_expenses_by_user},
    extract::{Path, Query},
    user::{UserID, get_user_by_id},
};

/// Every expense `user_id` has recorded, ordered by date then ID.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist.
pub fn expense_history(user_id: UserID, connection: &Connection) -> Result<Vec<Expense>, Error> {
    get_user_by_id(user_id, connection)?;

    get_expenses_by_user(user_id, connection)
}

/// The expenses `user_id` recorded in `month` (`yyyy-MM`) with their
/// category names, ordered by date then ID.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist or
/// [Error::InvalidMonthFormat] if `month` is not a valid month.
pub fn monthly_expenses(
    user_id: UserID,
    month: &str,
    connection: &Connection,
) -> Result<Vec<CategorizedExpense>, Error> {
    get_user_by_id(user_id, connection)?;
    let range = parse_month(month)?;

    get_categorized_expenses_in_range(user_id, &range, connection)
}

/// The query string for endpoints that are scoped to one user and month.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthQuery {
    /// The user to report on.
    pub user_id: UserID,
    /// The month as `yyyy-MM`.
    pub month: String,
}

/// Handle a request for a user's full expense history.
pub async fn expense_history_endpoint(
    Path(user_id): Path<UserID>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Vec<Expense>>, Error> {
    let connection = state.db_connection.lock()?;
    let expenses = expense_history(user_id, &connection)?;

    Ok(ApiResponse::success("Expense history fetched", expenses))
}

/// Handle a request for the expenses in one month.
pub async fn monthly_expenses_endpoint(
    Query(query): Query<MonthQuery>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Vec<CategorizedExpense>>, Error> {
    let connection = state.db_connection.lock()?;
    let expenses = monthly_expenses(query.user_id, &query.month, &connection)?;

    Ok(ApiResponse::success("Monthly expenses fetched", expenses))
}
