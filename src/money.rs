//! Helpers for moving [Decimal] amounts in and out of SQLite and for
//! arithmetic on them.
//!
//! Amounts are stored as decimal TEXT rather than REAL so that a value never
//! passes through binary floating point. Consequently, sums are computed in
//! Rust after fetching the rows instead of with SQL `SUM`.

use std::str::FromStr;

use rusqlite::{Row, types::Type};
use rust_decimal::Decimal;

use crate::Error;

/// Format `amount` for storage in a TEXT column.
pub(crate) fn to_sql_text(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Read the decimal stored as TEXT in column `index` of `row`.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    Decimal::from_str(&raw).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

/// `lhs + rhs`.
///
/// # Errors
/// Returns [Error::AmountOutOfRange] if the sum overflows [Decimal].
pub(crate) fn add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, Error> {
    lhs.checked_add(rhs).ok_or(Error::AmountOutOfRange)
}

/// `lhs - rhs`.
///
/// # Errors
/// Returns [Error::AmountOutOfRange] if the difference overflows [Decimal].
pub(crate) fn subtract(lhs: Decimal, rhs: Decimal) -> Result<Decimal, Error> {
    lhs.checked_sub(rhs).ok_or(Error::AmountOutOfRange)
}

/// The sum of `amounts`.
///
/// # Errors
/// Returns [Error::AmountOutOfRange] if a partial sum overflows [Decimal].
pub(crate) fn sum<I>(amounts: I) -> Result<Decimal, Error>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, add)
}
