//! Endpoints for reading categories.

use axum::extract::State;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    category::{Category, get_all_categories, get_categories_by_user, get_category},
    database_id::CategoryId,
    extract::Path,
    user::UserID,
};

/// Get every category, default templates included.
pub async fn get_all_categories_endpoint(
    State(state): State<DbState>,
) -> Result<ApiResponse<Vec<Category>>, Error> {
    let connection = state.db_connection.lock()?;
    let categories = get_all_categories(&connection)?;

    Ok(ApiResponse::success("All categories", categories))
}

/// Get a single category by ID.
pub async fn get_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Category>, Error> {
    let connection = state.db_connection.lock()?;
    let category = get_category(category_id, &connection)?;

    Ok(ApiResponse::success("Category found", category))
}

/// Get the categories owned by a user.
pub async fn get_user_categories_endpoint(
    Path(user_id): Path<UserID>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Vec<Category>>, Error> {
    let connection = state.db_connection.lock()?;
    let categories = get_categories_by_user(user_id, &connection)?;

    Ok(ApiResponse::success("User categories", categories))
}
