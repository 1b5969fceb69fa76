//! The API endpoints URIs.
//!
//! For endpoints that take parameters, e.g., '/api/users/{user_id}', use [format_endpoint].

/// The route for registering users.
pub const USERS: &str = "/api/users";
/// The route for checking a user's credentials.
pub const LOG_IN: &str = "/api/log_in";
/// The route to access a single user.
pub const USER: &str = "/api/users/{user_id}";
/// The route for adding to a user's balance.
pub const USER_BALANCE: &str = "/api/users/{user_id}/balance";
/// The route for overwriting a user's balance.
pub const USER_EDIT_BALANCE: &str = "/api/users/{user_id}/edit-balance";
/// The route for overwriting a user's saving goal.
pub const USER_EDIT_SAVING: &str = "/api/users/{user_id}/edit-saving";
/// The route to access a user's categories.
pub const USER_CATEGORIES: &str = "/api/users/{user_id}/categories";
/// The route to delete one of a user's categories.
pub const USER_CATEGORY: &str = "/api/users/{user_id}/categories/{category_id}";
/// The route to a user's full expense history.
pub const USER_EXPENSES: &str = "/api/users/{user_id}/expenses";
/// The route to delete one of a user's expenses.
pub const USER_EXPENSE: &str = "/api/users/{user_id}/expenses/{expense_id}";
/// The route to a user's all-time spending per category.
pub const USER_CATEGORY_SUMMARY: &str = "/api/users/{user_id}/category-summary";
/// The route to access categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to record and list expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to a user's spending summary for one month.
pub const MONTHLY_SUMMARY: &str = "/api/expenses/monthly-summary";
/// The route to the expenses behind one line of a monthly summary.
pub const EXPENSE_DETAILS: &str = "/api/expenses/details";

/// Replace the parameters in `endpoint_path` with `ids`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// Parameters without a matching ID are left as is, extra IDs are ignored.
pub fn format_endpoint(endpoint_path: &str, ids: &[i64]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut rest = endpoint_path;
    let mut ids = ids.iter();

    while let Some(param_start) = rest.find('{') {
        let Some(param_len) = rest[param_start..].find('}') else {
            break;
        };
        let Some(id) = ids.next() else {
            break;
        };

        formatted.push_str(&rest[..param_start]);
        formatted.push_str(&id.to_string());
        rest = &rest[param_start + param_len + 1..];
    }

    formatted.push_str(rest);
    formatted
}
