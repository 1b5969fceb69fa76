//! The endpoint for looking up a user.

use axum::extract::State;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    extract::Path,
    user::{User, UserID, get_user_by_id},
};

/// Get a user by ID. The response never includes the password.
pub async fn get_user_endpoint(
    Path(user_id): Path<UserID>,
    State(state): State<DbState>,
) -> Result<ApiResponse<User>, Error> {
    let connection = state.db_connection.lock()?;
    let user = get_user_by_id(user_id, &connection)?;

    Ok(ApiResponse::success("User found", user))
}
