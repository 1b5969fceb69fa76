//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_user_category_endpoint, get_all_categories_endpoint,
        get_category_endpoint, get_user_categories_endpoint, rename_category_endpoint,
    },
    endpoints,
    expense::{
        delete_expense_endpoint, expense_history_endpoint, monthly_expenses_endpoint,
        record_expense_endpoint,
    },
    logging::logging_middleware,
    summary::{category_summary_endpoint, expense_details_endpoint, monthly_summary_endpoint},
    user::{
        add_to_balance_endpoint, get_user_endpoint, log_in_endpoint, register_user_endpoint,
        set_balance_endpoint, set_saving_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::USERS, post(register_user_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint))
        .route(endpoints::USER, get(get_user_endpoint))
        .route(endpoints::USER_BALANCE, put(add_to_balance_endpoint))
        .route(endpoints::USER_EDIT_BALANCE, put(set_balance_endpoint))
        .route(endpoints::USER_EDIT_SAVING, put(set_saving_endpoint))
        .route(
            endpoints::USER_CATEGORIES,
            get(get_user_categories_endpoint),
        )
        .route(
            endpoints::USER_CATEGORY,
            delete(delete_user_category_endpoint),
        )
        .route(endpoints::USER_EXPENSES, get(expense_history_endpoint))
        .route(endpoints::USER_EXPENSE, delete(delete_expense_endpoint))
        .route(
            endpoints::USER_CATEGORY_SUMMARY,
            get(category_summary_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(get_all_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint).put(rename_category_endpoint),
        )
        .route(
            endpoints::EXPENSES,
            get(monthly_expenses_endpoint).post(record_expense_endpoint),
        )
        .route(endpoints::MONTHLY_SUMMARY, get(monthly_summary_endpoint))
        .route(endpoints::EXPENSE_DETAILS, get(expense_details_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
