//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryName, NewCategory, find_by_name},
    database_id::CategoryId,
    user::UserID,
};

const INSERT_CATEGORY: &str = "INSERT INTO category (name, user_id, is_default) VALUES (?1, ?2, ?3)
     RETURNING id, name, user_id, is_default";

/// Create a category and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCategory] if the owner already has a category with this name,
///   or a template with this name already exists,
/// - [Error::UserNotFound] if the owner does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(INSERT_CATEGORY)?
        .query_row(
            (
                new_category.name.as_ref(),
                new_category.user_id.map(|id| id.as_i64()),
                new_category.is_default,
            ),
            map_row,
        )
        .map_err(|error| map_insert_error(error, &new_category.name))
}

/// Create many categories, reusing one prepared statement.
///
/// Call this inside a transaction to make the batch all-or-nothing.
///
/// # Errors
/// Stops at, and returns, the first error that [create_category] would return.
pub fn create_categories(
    new_categories: Vec<NewCategory>,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let mut statement = connection.prepare(INSERT_CATEGORY)?;
    let mut categories = Vec::with_capacity(new_categories.len());

    for new_category in new_categories {
        let category = statement
            .query_row(
                (
                    new_category.name.as_ref(),
                    new_category.user_id.map(|id| id.as_i64()),
                    new_category.is_default,
                ),
                map_row,
            )
            .map_err(|error| map_insert_error(error, &new_category.name))?;

        categories.push(category);
    }

    Ok(categories)
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if there is no such category.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, user_id, is_default FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| Error::from(error).or_not_found(Error::CategoryNotFound))
}

/// Whether a category with `category_id` exists.
pub fn category_exists(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM category WHERE id = ?1)",
            [category_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Retrieve every category, templates included, ordered by ID.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, user_id, is_default FROM category ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the categories owned by `user_id`, ordered by ID.
pub fn get_categories_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, user_id, is_default FROM category
             WHERE user_id = :user_id ORDER BY id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the global template categories, ordered by ID.
pub fn get_default_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, user_id, is_default FROM category
             WHERE is_default = 1 ORDER BY id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Find the category owned by `user_id` called `name`, ignoring letter case.
///
/// The comparison is done in Rust since SQLite's `NOCASE` only folds ASCII.
pub fn get_category_by_user_and_name(
    user_id: UserID,
    name: &str,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    let categories = get_categories_by_user(user_id, connection)?;

    Ok(find_by_name(&categories, name).cloned())
}

/// Update a category's name. Returns an error if the category doesn't exist.
pub fn update_category_name(
    category_id: CategoryId,
    new_name: &CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE category SET name = ?1 WHERE id = ?2",
            (new_name.as_ref(), category_id),
        )
        .map_err(|error| map_insert_error(error, new_name))?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist
/// or expenses still refer to it.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM category WHERE id = ?1", [category_id])
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::CategoryInUse,
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(())
}

/// Initialize the category table and indexes.
///
/// Templates have no owner and every owned category is not a template. Names
/// are unique per owner and among templates, ignoring ASCII letter case.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            user_id INTEGER REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            is_default INTEGER NOT NULL DEFAULT 0,
            CHECK ((is_default = 1) = (user_id IS NULL))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_category_user_name
            ON category(user_id, name COLLATE NOCASE) WHERE user_id IS NOT NULL;

        CREATE UNIQUE INDEX IF NOT EXISTS idx_category_default_name
            ON category(name COLLATE NOCASE) WHERE is_default = 1;",
    )?;

    Ok(())
}

fn map_insert_error(error: rusqlite::Error, name: &CategoryName) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        ) => Error::DuplicateCategory(name.to_string()),
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::UserNotFound,
        error => error.into(),
    }
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let user_id: Option<i64> = row.get(2)?;
    let is_default = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        user_id: user_id.map(UserID::new),
        is_default,
    })
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use crate::{
        Error,
        category::{
            CategoryName, NewCategory, category_exists, create_categories, create_category,
            delete_category, get_all_categories, get_categories_by_user, get_category,
            get_category_by_user_and_name, get_default_categories, update_category_name,
        },
        test_utils::{create_test_user, get_test_connection},
    };

    fn name(name: &str) -> CategoryName {
        CategoryName::new_unchecked(name)
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);

        let category = create_category(NewCategory::owned_by(user.id, name("Food")), &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name("Food"));
        assert_eq!(category.user_id, Some(user.id));
        assert!(!category.is_default);
    }

    #[test]
    fn create_category_fails_on_duplicate_name_ignoring_case() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        create_category(NewCategory::owned_by(user.id, name("Food")), &connection).unwrap();

        let result = create_category(NewCategory::owned_by(user.id, name("FOOD")), &connection);

        assert_eq!(result, Err(Error::DuplicateCategory("FOOD".to_owned())));
    }

    #[test]
    fn create_category_fails_on_duplicate_template() {
        let connection = get_test_connection();
        create_category(NewCategory::template(name("Food")), &connection).unwrap();

        let result = create_category(NewCategory::template(name("food")), &connection);

        assert_eq!(result, Err(Error::DuplicateCategory("food".to_owned())));
    }

    #[test]
    fn create_category_fails_on_missing_user() {
        let connection = get_test_connection();

        let result = create_category(
            NewCategory::owned_by(crate::user::UserID::new(99), name("Food")),
            &connection,
        );

        assert_eq!(result, Err(Error::UserNotFound));
    }

    #[test]
    fn create_categories_batch() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);

        let categories = create_categories(
            vec![
                NewCategory::owned_by(user.id, name("Food")),
                NewCategory::owned_by(user.id, name("Rent")),
            ],
            &connection,
        )
        .expect("Could not create categories");

        assert_eq!(categories.len(), 2);
        assert_eq!(
            get_categories_by_user(user.id, &connection).unwrap(),
            categories
        );
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_connection();
        let inserted = create_category(NewCategory::template(name("Foo")), &connection).unwrap();

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();
        let inserted = create_category(NewCategory::template(name("Foo")), &connection).unwrap();

        let selected = get_category(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::CategoryNotFound));
        assert_eq!(category_exists(inserted.id + 123, &connection), Ok(false));
        assert_eq!(category_exists(inserted.id, &connection), Ok(true));
    }

    #[test]
    fn filters_templates_and_owned_categories() {
        let connection = get_test_connection();
        let alice = create_test_user("alice", &connection);
        let bob = create_test_user("bob", &connection);
        let template = create_category(NewCategory::template(name("Food")), &connection).unwrap();
        let alices = create_category(NewCategory::owned_by(alice.id, name("Food")), &connection)
            .unwrap();
        let bobs = create_category(NewCategory::owned_by(bob.id, name("Food")), &connection)
            .unwrap();

        assert_eq!(
            get_default_categories(&connection).unwrap(),
            vec![template.clone()]
        );
        assert_eq!(
            get_categories_by_user(alice.id, &connection).unwrap(),
            vec![alices.clone()]
        );
        assert_eq!(
            HashSet::<_>::from_iter(get_all_categories(&connection).unwrap()),
            HashSet::from([template, alices, bobs])
        );
    }

    #[test]
    fn get_category_by_user_and_name_ignores_case() {
        let connection = get_test_connection();
        let alice = create_test_user("alice", &connection);
        let bob = create_test_user("bob", &connection);
        let category = create_category(NewCategory::owned_by(alice.id, name("Éclairs")), &connection)
            .unwrap();

        assert_eq!(
            get_category_by_user_and_name(alice.id, "éCLAIRS", &connection),
            Ok(Some(category))
        );
        assert_eq!(
            get_category_by_user_and_name(bob.id, "Éclairs", &connection),
            Ok(None)
        );
    }

    #[test]
    fn update_category_name_succeeds() {
        let connection = get_test_connection();
        let user = create_test_user("alice", &connection);
        let category =
            create_category(NewCategory::owned_by(user.id, name("Original")), &connection)
                .unwrap();

        update_category_name(category.id, &name("Updated"), &connection).unwrap();

        let updated = get_category(category.id, &connection).unwrap();
        assert_eq!(updated.name, name("Updated"));
        assert_eq!(updated.user_id, category.user_id);
        assert_eq!(updated.is_default, category.is_default);
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        let result = update_category_name(999999, &name("Updated"), &connection);

        assert_eq!(result, Err(Error::CategoryNotFound));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_connection();
        let category = create_category(NewCategory::template(name("ToDelete")), &connection)
            .unwrap();

        delete_category(category.id, &connection).unwrap();

        assert_eq!(
            get_category(category.id, &connection),
            Err(Error::CategoryNotFound)
        );
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        let result = delete_category(999999, &connection);

        assert_eq!(result, Err(Error::CategoryNotFound));
    }
}
