//! Copies the global category templates into a user's own category set.

use rusqlite::Connection;

use crate::{
    Error,
    category::{
        Category, NewCategory, create_categories, find_by_name, get_categories_by_user,
        get_default_categories,
    },
    db::begin_immediate,
    user::{UserID, get_user_by_id},
};

/// Give `user_id` a private, editable copy of every default category.
///
/// Templates whose name the user already owns (ignoring letter case) are
/// skipped, so running this again never duplicates categories. Returns the
/// categories created by this call.
///
/// # Errors
/// Returns [Error::UserNotFound] if the user does not exist, or an SQL error.
/// Either all of the categories are created or none are.
pub fn provision_default_categories(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let transaction = begin_immediate(connection)?;
    get_user_by_id(user_id, &transaction)?;

    let provisioned = provision_within_transaction(user_id, &transaction)?;
    transaction.commit()?;

    tracing::debug!(
        "provisioned {} default categories for user {user_id}",
        provisioned.len()
    );

    Ok(provisioned)
}

/// Same as [provision_default_categories] for a caller that already holds a
/// transaction on `connection`.
pub(crate) fn provision_within_transaction(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let templates = get_default_categories(connection)?;
    let owned = get_categories_by_user(user_id, connection)?;

    let new_categories = templates
        .into_iter()
        .filter(|template| find_by_name(&owned, template.name.as_ref()).is_none())
        .map(|template| NewCategory::owned_by(user_id, template.name))
        .collect();

    create_categories(new_categories, connection)
}

#[cfg(test)]
mod provision_tests {
    use crate::{
        Error,
        category::{
            CategoryName, DefaultCategories, NewCategory, create_category,
            get_categories_by_user, get_default_categories, provision_default_categories,
            seed_default_categories,
        },
        test_utils::{create_test_user, get_test_connection},
        user::UserID,
    };

    #[test]
    fn copies_every_template_as_owned_category() {
        let connection = get_test_connection();
        let defaults = DefaultCategories::new(["Food", "Transport", "Rent"]);
        seed_default_categories(&defaults, &connection).unwrap();
        let user = create_test_user("alice", &connection);

        let provisioned = provision_default_categories(user.id, &connection).unwrap();

        assert_eq!(provisioned.len(), 3);
        for category in &provisioned {
            assert_eq!(category.user_id, Some(user.id));
            assert!(!category.is_default);
        }
        assert_eq!(
            get_categories_by_user(user.id, &connection).unwrap(),
            provisioned
        );
        // Templates are left untouched.
        assert_eq!(get_default_categories(&connection).unwrap().len(), 3);
    }

    #[test]
    fn running_twice_does_not_duplicate() {
        let connection = get_test_connection();
        seed_default_categories(&DefaultCategories::new(["Food", "Rent"]), &connection).unwrap();
        let user = create_test_user("alice", &connection);
        create_category(
            NewCategory::owned_by(user.id, CategoryName::new_unchecked("FOOD")),
            &connection,
        )
        .unwrap();

        let first = provision_default_categories(user.id, &connection).unwrap();
        let second = provision_default_categories(user.id, &connection).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name.as_ref(), "Rent");
        assert!(second.is_empty());
        assert_eq!(get_categories_by_user(user.id, &connection).unwrap().len(), 2);
    }

    #[test]
    fn no_templates_gives_no_categories() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);

        let provisioned = provision_default_categories(user.id, &connection).unwrap();

        assert!(provisioned.is_empty());
    }

    #[test]
    fn fails_for_missing_user() {
        let connection = get_test_connection();
        seed_default_categories(&DefaultCategories::standard(), &connection).unwrap();

        let result = provision_default_categories(UserID::new(404), &connection);

        assert_eq!(result, Err(Error::UserNotFound));
    }
}
