//! Reports built from a user's expenses.

mod aggregation;
mod category_summary;
mod details;
mod monthly;

pub use aggregation::{CategorySpending, CategoryTotal, total_spent};
pub(crate) use aggregation::{spending_by_category_name, total_by_category};
pub use category_summary::{category_summary, category_summary_endpoint};
pub use details::{DetailsQuery, ExpenseDetail, expense_details, expense_details_endpoint};
pub use monthly::{MonthlySummary, monthly_summary, monthly_summary_endpoint};
