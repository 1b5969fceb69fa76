//! The drill-down from a monthly summary into one category's expenses.

use axum::extract::State;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    calendar::parse_month,
    expense::get_expenses_by_category_name_in_range,
    extract::Query,
    user::{UserID, get_user_by_id},
};

/// One line of the expense drill-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDetail {
    /// The day the money was spent.
    pub date: Date,
    /// The amount spent.
    pub amount: Decimal,
    /// The note attached to the expense.
    pub description: String,
}

/// The expenses `user_id` recorded in `month` (`yyyy-MM`) under categories
/// named exactly `category_name`, ordered by date then ID.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist or
/// [Error::InvalidMonthFormat] if `month` is not a valid month.
pub fn expense_details(
    user_id: UserID,
    month: &str,
    category_name: &str,
    connection: &Connection,
) -> Result<Vec<ExpenseDetail>, Error> {
    get_user_by_id(user_id, connection)?;
    let range = parse_month(month)?;

    let expenses =
        get_expenses_by_category_name_in_range(user_id, category_name, &range, connection)?;

    let details = expenses
        .into_iter()
        .map(|expense| ExpenseDetail {
            date: expense.date,
            amount: expense.amount,
            description: expense.description,
        })
        .collect();

    Ok(details)
}

/// The query string for the drill-down endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsQuery {
    /// The user to report on.
    pub user_id: UserID,
    /// The month as `yyyy-MM`.
    pub month: String,
    /// The exact category name.
    pub category: String,
}

/// Handle a request for the expenses behind one line of a monthly summary.
pub async fn expense_details_endpoint(
    Query(query): Query<DetailsQuery>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Vec<ExpenseDetail>>, Error> {
    let connection = state.db_connection.lock()?;
    let details = expense_details(query.user_id, &query.month, &query.category, &connection)?;

    Ok(ApiResponse::success("Expense details fetched", details))
}
