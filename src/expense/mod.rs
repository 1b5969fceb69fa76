//! Expenses and the ledger operations that keep a user's balance in step
//! with them.

mod db;
mod delete;
mod domain;
mod history;
mod record;

pub use db::{
    count_expenses_in_category, create_expense, create_expense_table,
    get_categorized_expenses_in_range, get_expense, get_expenses_by_category_name_in_range,
    get_expenses_by_user, remove_expense, sum_amount_by_category_for_user,
    sum_amount_by_category_name_in_range,
};
pub use delete::{delete_expense, delete_expense_endpoint};
pub use domain::{CategorizedExpense, Expense, ExpenseRequest, NewExpense, RecordedExpense};
pub use history::{
    MonthQuery, expense_history, expense_history_endpoint, monthly_expenses,
    monthly_expenses_endpoint,
};
pub use record::{RecordExpenseState, record_expense, record_expense_endpoint};
