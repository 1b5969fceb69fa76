//! The rules for creating, renaming and deleting a user's categories.

use rusqlite::Connection;

use crate::{
    Error,
    category::{
        Category, CategoryName, NewCategory, create_category, delete_category,
        get_categories_by_user, get_category, get_category_by_user_and_name,
        update_category_name,
    },
    database_id::CategoryId,
    db::begin_immediate,
    expense::count_expenses_in_category,
    user::{UserID, get_user_by_id},
};

/// Create a category owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategoryData] if `name` is blank or `user_id` is missing,
/// - [Error::UserNotFound] if the user does not exist,
/// - [Error::DuplicateCategory] if the user already has a category called `name`
///   (ignoring letter case),
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_user_category(
    name: &str,
    user_id: Option<UserID>,
    connection: &Connection,
) -> Result<Category, Error> {
    let name = CategoryName::new(name)?;
    let user_id = user_id.ok_or(Error::InvalidCategoryData)?;

    let transaction = begin_immediate(connection)?;
    get_user_by_id(user_id, &transaction)?;

    if get_category_by_user_and_name(user_id, name.as_ref(), &transaction)?.is_some() {
        return Err(Error::DuplicateCategory(name.to_string()));
    }

    let category = create_category(NewCategory::owned_by(user_id, name), &transaction)?;
    transaction.commit()?;

    Ok(category)
}

/// Delete one of `user_id`'s categories.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if the category does not exist,
/// - [Error::NotAllowed] if the category is a default template or belongs to
///   another user,
/// - [Error::CategoryInUse] if any expense refers to the category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_user_category(
    user_id: UserID,
    category_id: CategoryId,
    connection: &Connection,
) -> Result<(), Error> {
    let transaction = begin_immediate(connection)?;
    let category = get_category(category_id, &transaction)?;

    if category.is_default || category.user_id != Some(user_id) {
        return Err(Error::NotAllowed);
    }

    if count_expenses_in_category(category_id, &transaction)? > 0 {
        return Err(Error::CategoryInUse);
    }

    delete_category(category_id, &transaction)?;
    transaction.commit()?;

    Ok(())
}

/// Rename one of `user_id`'s categories, leaving every other field as is.
///
/// Changing only the letter case of the current name is allowed.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if the category does not exist,
/// - [Error::InvalidCategoryData] if `name` is blank,
/// - [Error::NotAllowed] if the category is a default template or belongs to
///   another user,
/// - [Error::DuplicateCategory] if another of the user's categories is already
///   called `name`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn rename_category(
    category_id: CategoryId,
    user_id: UserID,
    name: &str,
    connection: &Connection,
) -> Result<Category, Error> {
    let transaction = begin_immediate(connection)?;
    let category = get_category(category_id, &transaction)?;
    let name = CategoryName::new(name)?;

    if category.is_default || category.user_id != Some(user_id) {
        return Err(Error::NotAllowed);
    }

    let clashes = get_categories_by_user(user_id, &transaction)?
        .iter()
        .any(|other| other.id != category_id && other.name.eq_ignore_case(name.as_ref()));

    if clashes {
        return Err(Error::DuplicateCategory(name.to_string()));
    }

    update_category_name(category_id, &name, &transaction)?;
    transaction.commit()?;

    Ok(Category { name, ..category })
}
