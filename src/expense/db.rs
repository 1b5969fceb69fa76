//! Database operations for expenses, including the grouped reads used by the
//! summaries.

use std::ops::RangeInclusive;

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    database_id::{CategoryId, ExpenseId},
    expense::{CategorizedExpense, Expense, NewExpense},
    money::{get_decimal, to_sql_text},
    summary::{CategorySpending, CategoryTotal, spending_by_category_name, total_by_category},
    user::UserID,
};

const SELECT_EXPENSE: &str =
    "SELECT id, user_id, category_id, amount, description, date FROM expense";

/// Create the expense table and its indexes.
///
/// Categories that expenses refer to cannot be deleted.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            amount TEXT NOT NULL,
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_expense_user_date ON expense(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_expense_category ON expense(category_id);",
    )?;

    Ok(())
}

/// Insert an expense. Does not touch the owner's balance.
///
/// # Errors
/// Returns an [Error::SqlError] if the user or category does not exist or
/// there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let id = connection
        .prepare(
            "INSERT INTO expense (user_id, category_id, amount, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
        )?
        .query_row(
            (
                new_expense.user_id.as_i64(),
                new_expense.category_id,
                to_sql_text(new_expense.amount),
                &new_expense.description,
                new_expense.date,
            ),
            |row| row.get(0),
        )?;

    Ok(Expense {
        id,
        user_id: new_expense.user_id,
        category_id: new_expense.category_id,
        amount: new_expense.amount,
        description: new_expense.description,
        date: new_expense.date,
    })
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no such expense.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} WHERE id = :id"))?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(|error| Error::from(error).or_not_found(Error::ExpenseNotFound))
}

/// Retrieve all of a user's expenses, oldest first.
pub fn get_expenses_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_EXPENSE} WHERE user_id = :user_id ORDER BY date ASC, id ASC"
        ))?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Delete an expense by ID. Does not touch the owner's balance.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no such expense.
pub fn remove_expense(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    if rows_affected == 0 {
        return Err(Error::ExpenseNotFound);
    }

    Ok(())
}

/// The number of expenses filed under `category_id`, across all users.
pub fn count_expenses_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<i64, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM expense WHERE category_id = ?1",
            [category_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// The all-time total of a user's expenses per category, ordered by category ID.
///
/// Categories without any of the user's expenses are left out.
pub fn sum_amount_by_category_for_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    let rows = connection
        .prepare(
            "SELECT category.id, category.name, expense.amount
             FROM expense
             INNER JOIN category ON category.id = expense.category_id
             WHERE expense.user_id = :user_id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            Ok((row.get(0)?, row.get(1)?, get_decimal(row, 2)?))
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    total_by_category(rows)
}

/// The total of a user's expenses dated within `range` per category name,
/// ordered by name.
pub fn sum_amount_by_category_name_in_range(
    user_id: UserID,
    range: &RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<CategorySpending>, Error> {
    let rows = connection
        .prepare(
            "SELECT category.name, expense.amount
             FROM expense
             INNER JOIN category ON category.id = expense.category_id
             WHERE expense.user_id = :user_id
               AND expense.date BETWEEN :start AND :end",
        )?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id.as_i64(),
                ":start": range.start(),
                ":end": range.end(),
            },
            |row| Ok((row.get(0)?, get_decimal(row, 1)?)),
        )?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    spending_by_category_name(rows)
}

/// A user's expenses dated within `range` whose category is called exactly
/// `category_name`, ordered by date then ID.
pub fn get_expenses_by_category_name_in_range(
    user_id: UserID,
    category_name: &str,
    range: &RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT expense.id, expense.user_id, expense.category_id, expense.amount,
                    expense.description, expense.date
             FROM expense
             INNER JOIN category ON category.id = expense.category_id
             WHERE expense.user_id = :user_id
               AND category.name = :category_name
               AND expense.date BETWEEN :start AND :end
             ORDER BY expense.date ASC, expense.id ASC",
        )?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id.as_i64(),
                ":category_name": category_name,
                ":start": range.start(),
                ":end": range.end(),
            },
            map_row,
        )?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// A user's expenses dated within `range` with their category names, ordered
/// by date then ID.
pub fn get_categorized_expenses_in_range(
    user_id: UserID,
    range: &RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<CategorizedExpense>, Error> {
    connection
        .prepare(
            "SELECT expense.id, expense.user_id, expense.category_id, category.name,
                    expense.amount, expense.description, expense.date
             FROM expense
             INNER JOIN category ON category.id = expense.category_id
             WHERE expense.user_id = :user_id
               AND expense.date BETWEEN :start AND :end
             ORDER BY expense.date ASC, expense.id ASC",
        )?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id.as_i64(),
                ":start": range.start(),
                ":end": range.end(),
            },
            |row| {
                Ok(CategorizedExpense {
                    id: row.get(0)?,
                    user_id: UserID::new(row.get(1)?),
                    category_id: row.get(2)?,
                    category_name: row.get(3)?,
                    amount: get_decimal(row, 4)?,
                    description: row.get(5)?,
                    date: row.get(6)?,
                })
            },
        )?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        category_id: row.get(2)?,
        amount: get_decimal(row, 3)?,
        description: row.get(4)?,
        date: row.get(5)?,
    })
}
