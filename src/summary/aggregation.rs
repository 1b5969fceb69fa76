//! Folds expense rows into per-category totals.
//!
//! Amounts are summed with [Decimal] arithmetic so totals are exact.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CategoryId, money};

/// The all-time total of a user's expenses in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category ID.
    pub id: CategoryId,
    /// The category name.
    pub name: String,
    /// The sum of the expense amounts.
    pub total: Decimal,
}

/// The amount spent in categories sharing one name over some date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpending {
    /// The category name.
    pub name: String,
    /// The sum of the expense amounts.
    pub amount: Decimal,
}

/// Sum `(category id, category name, amount)` rows per category.
///
/// Only categories that appear in `rows` are returned, ordered by ID.
///
/// # Errors
/// Returns [Error::AmountOutOfRange] if a category's total overflows.
pub(crate) fn total_by_category<I>(rows: I) -> Result<Vec<CategoryTotal>, Error>
where
    I: IntoIterator<Item = (CategoryId, String, Decimal)>,
{
    let mut totals: BTreeMap<CategoryId, CategoryTotal> = BTreeMap::new();

    for (id, name, amount) in rows {
        let entry = totals.entry(id).or_insert_with(|| CategoryTotal {
            id,
            name,
            total: Decimal::ZERO,
        });
        entry.total = money::add(entry.total, amount)?;
    }

    Ok(totals.into_values().collect())
}

/// Sum `(category name, amount)` rows per category name, ordered by name.
///
/// # Errors
/// Returns [Error::AmountOutOfRange] if a category's total overflows.
pub(crate) fn spending_by_category_name<I>(rows: I) -> Result<Vec<CategorySpending>, Error>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for (name, amount) in rows {
        let total = totals.entry(name).or_insert(Decimal::ZERO);
        *total = money::add(*total, amount)?;
    }

    Ok(totals
        .into_iter()
        .map(|(name, amount)| CategorySpending { name, amount })
        .collect())
}

/// The sum over all categories.
///
/// # Errors
/// Returns [Error::AmountOutOfRange] if the sum overflows.
pub fn total_spent(categories: &[CategorySpending]) -> Result<Decimal, Error> {
    money::sum(categories.iter().map(|category| category.amount))
}
