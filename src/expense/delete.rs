//! Deleting an expense and refunding it to the owner's balance.

use axum::extract::State;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    database_id::ExpenseId,
    db::begin_immediate,
    expense::{get_expense, remove_expense},
    extract::Path,
    money,
    user::{UserID, get_user_by_id, update_balance},
};

/// Delete one of `user_id`'s expenses and add its amount back to their balance.
///
/// Returns the balance after the refund.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no such expense,
/// [Error::NotAllowed] if the expense belongs to another user or
/// [Error::AmountOutOfRange] if the refund would overflow the balance.
pub fn delete_expense(
    user_id: UserID,
    expense_id: ExpenseId,
    connection: &Connection,
) -> Result<Decimal, Error> {
    let transaction = begin_immediate(connection)?;
    let expense = get_expense(expense_id, &transaction)?;

    if expense.user_id != user_id {
        return Err(Error::NotAllowed);
    }

    let user = get_user_by_id(user_id, &transaction)?;
    let new_balance = money::add(user.balance, expense.amount)?;

    remove_expense(expense_id, &transaction)?;
    update_balance(user_id, new_balance, &transaction)?;
    transaction.commit()?;

    tracing::info!(
        "deleted expense {expense_id} of {} for user {user_id}, balance is now {new_balance}",
        expense.amount
    );

    Ok(new_balance)
}

/// Handle deleting an expense.
pub async fn delete_expense_endpoint(
    Path((user_id, expense_id)): Path<(UserID, ExpenseId)>,
    State(state): State<DbState>,
) -> Result<ApiResponse<Decimal>, Error> {
    let connection = state.db_connection.lock()?;
    let new_balance = delete_expense(user_id, expense_id, &connection)?;

    Ok(ApiResponse::success("Expense deleted", new_balance))
}

#[cfg(test)]
mod delete_expense_tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        category::create_user_category,
        expense::{ExpenseRequest, delete_expense, get_expense, record_expense},
        test_utils::{create_test_user, get_test_connection},
        user::{get_user_by_id, set_balance},
    };

    #[test]
    fn refunds_balance() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        let category = create_user_category("Food", Some(user.id), &connection).unwrap();
        let recorded = record_expense(
            ExpenseRequest {
                user_id: user.id,
                category_id: category.id,
                amount: dec!(12.5),
                description: String::new(),
                date: None,
            },
            date!(2024 - 03 - 01),
            &connection,
        )
        .unwrap();

        let new_balance = delete_expense(user.id, recorded.expense_id, &connection).unwrap();

        assert_eq!(new_balance, dec!(0));
        assert_eq!(get_user_by_id(user.id, &connection).unwrap().balance, dec!(0));
        assert_eq!(
            get_expense(recorded.expense_id, &connection),
            Err(Error::ExpenseNotFound)
        );
    }

    #[test]
    fn overflowing_refund_is_rejected() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        let category = create_user_category("Food", Some(user.id), &connection).unwrap();
        let recorded = record_expense(
            ExpenseRequest {
                user_id: user.id,
                category_id: category.id,
                amount: dec!(10),
                description: String::new(),
                date: None,
            },
            date!(2024 - 03 - 01),
            &connection,
        )
        .unwrap();
        set_balance(user.id, Decimal::MAX, &connection).unwrap();

        assert_eq!(
            delete_expense(user.id, recorded.expense_id, &connection),
            Err(Error::AmountOutOfRange)
        );
        assert!(get_expense(recorded.expense_id, &connection).is_ok());
        assert_eq!(
            get_user_by_id(user.id, &connection).unwrap().balance,
            Decimal::MAX
        );
    }

    #[test]
    fn missing_expense_is_not_found() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);

        assert_eq!(
            delete_expense(user.id, 7, &connection),
            Err(Error::ExpenseNotFound)
        );
    }

    #[test]
    fn other_users_expense_is_not_allowed() {
        let connection = get_test_connection();
        let alice = create_test_user("alice", &connection);
        let bob = create_test_user("bob", &connection);
        let category = create_user_category("Food", Some(alice.id), &connection).unwrap();
        let recorded = record_expense(
            ExpenseRequest {
                user_id: alice.id,
                category_id: category.id,
                amount: dec!(5),
                description: String::new(),
                date: None,
            },
            date!(2024 - 03 - 01),
            &connection,
        )
        .unwrap();

        assert_eq!(
            delete_expense(bob.id, recorded.expense_id, &connection),
            Err(Error::NotAllowed)
        );
        assert!(get_expense(recorded.expense_id, &connection).is_ok());
        assert_eq!(
            get_user_by_id(alice.id, &connection).unwrap().balance,
            dec!(-5)
        );
    }
}
