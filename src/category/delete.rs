//! Category deletion endpoint.

use axum::extract::State;

use crate::{
    Error, api_response::ApiResponse, app_state::DbState, category::delete_user_category,
    database_id::CategoryId, extract::Path, user::UserID,
};

/// Handle deleting one of a user's categories.
pub async fn delete_user_category_endpoint(
    Path((user_id, category_id)): Path<(UserID, CategoryId)>,
    State(state): State<DbState>,
) -> Result<ApiResponse<()>, Error> {
    let connection = state.db_connection.lock()?;
    delete_user_category(user_id, category_id, &connection)?;

    tracing::info!("user {user_id} deleted category {category_id}");

    Ok(ApiResponse::ok("Category deleted"))
}
