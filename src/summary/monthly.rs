//! The monthly spending summary: what was spent, what is left and the goal.

use axum::extract::State;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    api_response::ApiResponse,
    app_state::DbState,
    calendar::parse_month,
    expense::{MonthQuery, sum_amount_by_category_name_in_range},
    extract::Query,
    money,
    summary::{CategorySpending, total_spent},
    user::{UserID, get_user_by_id},
};

/// A user's spending for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The user's saving goal.
    pub goal: Decimal,
    /// The total spent in the month.
    pub spent: Decimal,
    /// The user's current balance less the amount spent in the month.
    pub saving: Decimal,
    /// The amount spent per category name, ordered by name.
    pub categories: Vec<CategorySpending>,
}

/// Summarise `user_id`'s spending in `month` (`yyyy-MM`).
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist,
/// [Error::InvalidMonthFormat] if `month` is not a valid month or
/// [Error::AmountOutOfRange] if the totals overflow.
pub fn monthly_summary(
    user_id: UserID,
    month: &str,
    connection: &Connection,
) -> Result<MonthlySummary, Error> {
    let user = get_user_by_id(user_id, connection)?;
    let range = parse_month(month)?;

    let categories = sum_amount_by_category_name_in_range(user_id, &range, connection)?;
    let spent = total_spent(&categories)?;

    Ok(MonthlySummary {
        goal: user.saving,
        spent,
        saving: money::subtract(user.balance, spent)?,
        categories,
    })
}

/// Handle a request for a monthly summary.
pub async fn monthly_summary_endpoint(
    Query(query): Query<MonthQuery>,
    State(state): State<DbState>,
) -> Result<ApiResponse<MonthlySummary>, Error> {
    let connection = state.db_connection.lock()?;
    let summary = monthly_summary(query.user_id, &query.month, &connection)?;

    Ok(ApiResponse::success("Monthly summary fetched", summary))
}

#[cfg(test)]
mod monthly_summary_tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        Error,
        calendar::month_token,
        category::{
            DefaultCategories, create_user_category, get_categories_by_user,
            seed_default_categories,
        },
        expense::{ExpenseRequest, record_expense},
        summary::{CategorySpending, monthly_summary},
        test_utils::{create_test_expense, create_test_user, get_test_connection},
        timezone::local_today,
        user::{RegistrationForm, UserID, register_user, update_balance, update_saving},
    };

    #[test]
    fn empty_month_spends_nothing() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        update_balance(user.id, dec!(250), &connection).unwrap();
        update_saving(user.id, dec!(100), &connection).unwrap();

        let summary = monthly_summary(user.id, "2024-02", &connection).unwrap();

        assert_eq!(summary.spent, Decimal::ZERO);
        assert_eq!(summary.saving, dec!(250));
        assert_eq!(summary.goal, dec!(100));
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn spent_is_sum_of_categories() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        let food = create_user_category("Food", Some(user.id), &connection).unwrap();
        let rent = create_user_category("Rent", Some(user.id), &connection).unwrap();
        create_test_expense(user.id, rent.id, "2024-02-01", &connection);
        create_test_expense(user.id, food.id, "2024-02-15", &connection);
        create_test_expense(user.id, food.id, "2024-02-29", &connection);
        create_test_expense(user.id, food.id, "2024-03-01", &connection);

        let summary = monthly_summary(user.id, "2024-02", &connection).unwrap();
        let again = monthly_summary(user.id, "2024-02", &connection).unwrap();

        let category_total: Decimal = summary.categories.iter().map(|c| c.amount).sum();
        assert_eq!(summary.spent, category_total);
        assert_eq!(summary.spent, dec!(30));
        assert_eq!(summary.saving, dec!(-30));
        assert_eq!(
            summary.categories,
            vec![
                CategorySpending {
                    name: "Food".to_owned(),
                    amount: dec!(20)
                },
                CategorySpending {
                    name: "Rent".to_owned(),
                    amount: dec!(10)
                },
            ]
        );
        assert_eq!(summary, again);
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        let food = create_user_category("Food", Some(user.id), &connection).unwrap();
        let huge_expense = ExpenseRequest {
            user_id: user.id,
            category_id: food.id,
            amount: Decimal::MAX,
            description: String::new(),
            date: Some("2024-02-10".to_owned()),
        };
        record_expense(huge_expense.clone(), local_today("Etc/UTC").unwrap(), &connection)
            .unwrap();

        // The balance is now -MAX, so the saving figure cannot be represented.
        assert_eq!(
            monthly_summary(user.id, "2024-02", &connection),
            Err(Error::AmountOutOfRange)
        );

        update_balance(user.id, Decimal::MAX, &connection).unwrap();
        record_expense(huge_expense, local_today("Etc/UTC").unwrap(), &connection).unwrap();

        assert_eq!(
            monthly_summary(user.id, "2024-02", &connection),
            Err(Error::AmountOutOfRange)
        );
        assert!(monthly_summary(user.id, "2024-03", &connection).is_ok());
    }

    #[test]
    fn checks_user_before_month() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);

        assert_eq!(
            monthly_summary(UserID::new(42), "abc", &connection),
            Err(Error::UserNotFound)
        );
        assert_eq!(
            monthly_summary(user.id, "abc", &connection),
            Err(Error::InvalidMonthFormat("abc".to_owned()))
        );
    }

    #[test]
    fn new_user_first_expense_scenario() {
        let connection = get_test_connection();
        seed_default_categories(&DefaultCategories::standard(), &connection).unwrap();
        let user = register_user(
            RegistrationForm {
                username: "a".to_owned(),
                email: "a@x.com".to_owned(),
                password: "pw".to_owned(),
            },
            &connection,
        )
        .unwrap();
        assert_eq!(user.balance, Decimal::ZERO);
        let food = get_categories_by_user(user.id, &connection)
            .unwrap()
            .into_iter()
            .find(|category| category.name.as_ref() == "Food")
            .expect("Food was not provisioned");
        let today = local_today("Etc/UTC").unwrap();

        let recorded = record_expense(
            ExpenseRequest {
                user_id: user.id,
                category_id: food.id,
                amount: dec!(50),
                description: "Groceries".to_owned(),
                date: None,
            },
            today,
            &connection,
        )
        .unwrap();
        let summary = monthly_summary(user.id, &month_token(today), &connection).unwrap();

        assert_eq!(recorded.new_balance, dec!(-50));
        assert_eq!(summary.spent, dec!(50));
        assert_eq!(
            summary.categories,
            vec![CategorySpending {
                name: "Food".to_owned(),
                amount: dec!(50)
            }]
        );
    }
}
