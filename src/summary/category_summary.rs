//! The all-time spending per category for one user.

use axum::extract::State;
use rusqlite::Connection;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    expense::sum_amount_by_category_for_user,
    extract::Path,
    summary::CategoryTotal,
    user::{UserID, get_user_by_id},
};

/// Total `user_id`'s expenses per category, ordered by category ID.
///
/// Categories the user has not spent anything in are left out.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist.
pub fn category_summary(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    get_user_by_id(user_id, connection)?;

    sum_amount_by_category_for_user(user_id, connection)
}

/// Handle a request for a user's category summary.
pub async fn category_summary_endpoint(
    Path(user_id): Path<UserID>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Vec<CategoryTotal>>, Error> {
    let connection = state.db_connection.lock()?;
    let summary = category_summary(user_id, &connection)?;

    Ok(ApiResponse::success("Category summary retrieved", summary))
}
