//! Recording an expense and debiting it from the owner's balance.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Date;

use crate::{
    AppState, Error,
    api_response::ApiResponse,
    calendar::parse_date,
    category::category_exists,
    db::begin_immediate,
    expense::{ExpenseRequest, NewExpense, RecordedExpense, create_expense},
    extract::Json,
    money,
    timezone::local_today,
    user::{get_user_by_id, update_balance},
};

/// Validate `request`, store it and subtract its amount from the user's balance.
///
/// Both writes happen in one immediate transaction, so concurrent submissions
/// for the same user are applied one after the other. `today` is used when
/// the request has no date. The category does not have to belong to the user.
///
/// # Errors
/// The checks run in this order:
/// - [Error::UserNotFound] if the user does not exist,
/// - [Error::CategoryNotFound] if the category does not exist,
/// - [Error::InvalidAmount] if the amount is not greater than zero,
/// - [Error::InvalidDate] if the date is not formatted as `yyyy-MM-dd`,
/// - [Error::AmountOutOfRange] if the debit would overflow the balance.
///
/// Nothing is written when any check fails.
pub fn record_expense(
    request: ExpenseRequest,
    today: Date,
    connection: &Connection,
) -> Result<RecordedExpense, Error> {
    let transaction = begin_immediate(connection)?;
    let user = get_user_by_id(request.user_id, &transaction)?;

    if !category_exists(request.category_id, &transaction)? {
        return Err(Error::CategoryNotFound);
    }

    if request.amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount);
    }

    let date = match request.date.as_deref() {
        Some(text) => parse_date(text)?,
        None => today,
    };

    let new_balance = money::subtract(user.balance, request.amount)?;

    let expense = create_expense(
        NewExpense {
            user_id: user.id,
            category_id: request.category_id,
            amount: request.amount,
            description: request.description,
            date,
        },
        &transaction,
    )?;

    update_balance(user.id, new_balance, &transaction)?;
    transaction.commit()?;

    tracing::info!(
        "recorded expense {} of {} for user {}, balance is now {new_balance}",
        expense.id,
        expense.amount,
        user.id
    );

    Ok(RecordedExpense {
        expense_id: expense.id,
        new_balance,
    })
}

/// The state needed for recording an expense.
#[derive(Debug, Clone)]
pub struct RecordExpenseState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The timezone used to decide what "today" is.
    pub local_timezone: String,
}

impl FromRef<AppState> for RecordExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Handle an expense submission.
pub async fn record_expense_endpoint(
    State(state): State<RecordExpenseState>,
    Json(request): Json<ExpenseRequest>,
) -> Result<ApiResponse<RecordedExpense>, Error> {
    let today = local_today(&state.local_timezone)?;
    let connection = state.db_connection.lock()?;
    let recorded = record_expense(request, today, &connection)?;

    Ok(ApiResponse::success("Expense added successfully", recorded))
}
