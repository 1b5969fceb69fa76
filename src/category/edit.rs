//! Category rename endpoint.

use axum::extract::State;
use serde::Deserialize;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    category::{Category, rename_category},
    database_id::CategoryId,
    extract::{Json, Path},
    user::UserID,
};

/// The request body for renaming a category.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameCategoryForm {
    /// The user that owns the category.
    pub user_id: UserID,
    /// The new display name.
    #[serde(default)]
    pub name: String,
}

/// Handle renaming a category.
pub async fn rename_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DbState>,
    Json(form): Json<RenameCategoryForm>,
) -> Result<ApiResponse<Category>, Error> {
    let connection = state.db_connection.lock()?;
    let category = rename_category(category_id, form.user_id, &form.name, &connection)?;

    Ok(ApiResponse::success("Category updated", category))
}
