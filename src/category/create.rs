//! Category creation endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error, api_response::ApiResponse, app_state::DbState, category::create_user_category,
    extract::Json, user::UserID,
};

/// The request body for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryForm {
    /// The display name of the new category.
    #[serde(default)]
    pub name: String,
    /// The user that will own the category.
    pub user_id: Option<UserID>,
}

/// Handle a request to create a category for a user.
pub async fn create_category_endpoint(
    State(state): State<DbState>,
    Json(form): Json<CategoryForm>,
) -> Result<Response, Error> {
    let connection = state.db_connection.lock()?;
    let category = create_user_category(&form.name, form.user_id, &connection)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Category created", category),
    )
        .into_response())
}
