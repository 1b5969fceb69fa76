//! Core expense domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    database_id::{CategoryId, ExpenseId},
    user::UserID,
};

/// An amount of money a user spent in one category on one day.
///
/// Every stored expense has already been debited from its owner's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The user that spent the money.
    pub user_id: UserID,
    /// The category the expense was filed under.
    pub category_id: CategoryId,
    /// The amount spent, always greater than zero.
    pub amount: Decimal,
    /// A free-text note.
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
}

/// A validated expense ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// The user that spent the money.
    pub user_id: UserID,
    /// The category the expense is filed under.
    pub category_id: CategoryId,
    /// The amount spent.
    pub amount: Decimal,
    /// A free-text note.
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
}

/// An expense as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// The user that spent the money.
    pub user_id: UserID,
    /// The category to file the expense under.
    pub category_id: CategoryId,
    /// The amount spent, must be greater than zero.
    pub amount: Decimal,
    /// A free-text note.
    #[serde(default)]
    pub description: String,
    /// The day the money was spent as `yyyy-MM-dd`, defaults to today.
    #[serde(default)]
    pub date: Option<String>,
}

/// The outcome of recording an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedExpense {
    /// The ID of the new expense.
    pub expense_id: ExpenseId,
    /// The user's balance after the expense was debited.
    pub new_balance: Decimal,
}

/// An expense together with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedExpense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The user that spent the money.
    pub user_id: UserID,
    /// The category the expense was filed under.
    pub category_id: CategoryId,
    /// The name of the category.
    pub category_name: String,
    /// The amount spent.
    pub amount: Decimal,
    /// A free-text note.
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
}
