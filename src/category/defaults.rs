//! The global category templates every new user starts with.

use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryName, NewCategory, create_categories, get_default_categories},
    db::begin_immediate,
};

/// The names used when no templates are configured.
pub const STANDARD_CATEGORY_NAMES: [&str; 7] = [
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Health",
    "Shopping",
];

/// The set of template category names seeded into the database at start-up.
///
/// Names are trimmed, blank names are dropped and later duplicates (ignoring
/// letter case) are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCategories(Vec<CategoryName>);

impl DefaultCategories {
    /// Build the template set from a list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<CategoryName> = Vec::new();

        for name in names {
            let Ok(name) = CategoryName::new(name.as_ref()) else {
                continue;
            };

            if !unique
                .iter()
                .any(|existing| existing.eq_ignore_case(name.as_ref()))
            {
                unique.push(name);
            }
        }

        Self(unique)
    }

    /// The built-in template set, see [STANDARD_CATEGORY_NAMES].
    pub fn standard() -> Self {
        Self::new(STANDARD_CATEGORY_NAMES)
    }

    /// The template names in the order they were given.
    pub fn names(&self) -> &[CategoryName] {
        &self.0
    }
}

/// Insert the templates in `defaults` that are not already stored.
///
/// Safe to call on every start-up, existing templates are matched by name
/// ignoring letter case. Returns the templates inserted by this call.
///
/// # Errors
/// Returns an error if there is an SQL error, in which case nothing is inserted.
pub fn seed_default_categories(
    defaults: &DefaultCategories,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let transaction = begin_immediate(connection)?;
    let existing = get_default_categories(&transaction)?;

    let missing = defaults
        .names()
        .iter()
        .filter(|name| {
            !existing
                .iter()
                .any(|template| template.name.eq_ignore_case(name.as_ref()))
        })
        .cloned()
        .map(NewCategory::template)
        .collect();

    let seeded = create_categories(missing, &transaction)?;
    transaction.commit()?;

    Ok(seeded)
}

#[cfg(test)]
mod default_categories_tests {
    use crate::{
        category::{DefaultCategories, get_default_categories, seed_default_categories},
        test_utils::get_test_connection,
    };

    #[test]
    fn new_drops_blank_and_duplicate_names() {
        let defaults = DefaultCategories::new(["Food", " ", "food", " Rent "]);

        let names: Vec<&str> = defaults.names().iter().map(|name| name.as_ref()).collect();

        assert_eq!(names, vec!["Food", "Rent"]);
    }

    #[test]
    fn standard_set_has_seven_templates() {
        assert_eq!(DefaultCategories::standard().names().len(), 7);
    }

    #[test]
    fn seeding_is_idempotent() {
        let connection = get_test_connection();
        let defaults = DefaultCategories::new(["Food", "Transport"]);

        let first = seed_default_categories(&defaults, &connection).unwrap();
        let second = seed_default_categories(&defaults, &connection).unwrap();

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
        assert_eq!(get_default_categories(&connection).unwrap(), first);
    }

    #[test]
    fn seeding_adds_only_new_templates() {
        let connection = get_test_connection();
        seed_default_categories(&DefaultCategories::new(["Food"]), &connection).unwrap();

        let seeded =
            seed_default_categories(&DefaultCategories::new(["FOOD", "Health"]), &connection)
                .unwrap();

        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].name.as_ref(), "Health");
        assert!(seeded[0].is_default);
        assert_eq!(seeded[0].user_id, None);
    }
}
