//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CategoryId, user::UserID};

/// A validated, non-blank category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCategoryData] if `name` is blank.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::InvalidCategoryData)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not blank.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Whether `other` names the same category, ignoring letter case.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spending category, e.g. 'Groceries', 'Transport'.
///
/// Default categories are global templates with no owner. Every other
/// category belongs to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: CategoryName,
    /// The owner of the category, `None` for default templates.
    pub user_id: Option<UserID>,
    /// Whether the category is a global template.
    pub is_default: bool,
}

/// The details needed to insert a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// The display name of the category.
    pub name: CategoryName,
    /// The owner of the category, `None` for default templates.
    pub user_id: Option<UserID>,
    /// Whether the category is a global template.
    pub is_default: bool,
}

impl NewCategory {
    /// A global template category.
    pub fn template(name: CategoryName) -> Self {
        Self {
            name,
            user_id: None,
            is_default: true,
        }
    }

    /// A category owned by `user_id`.
    pub fn owned_by(user_id: UserID, name: CategoryName) -> Self {
        Self {
            name,
            user_id: Some(user_id),
            is_default: false,
        }
    }
}

/// Find the category named `name` (ignoring letter case) in `categories`.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|category| category.name.eq_ignore_case(name))
}
