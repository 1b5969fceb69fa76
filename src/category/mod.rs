//! Spending categories: the default templates, each user's own copies and
//! the rules for changing them.

mod create;
mod db;
mod defaults;
mod delete;
mod domain;
mod edit;
mod guard;
mod list;
mod provision;

pub use create::create_category_endpoint;
pub use db::{
    category_exists, create_categories, create_category, create_category_table, delete_category,
    get_all_categories, get_categories_by_user, get_category, get_category_by_user_and_name,
    get_default_categories, update_category_name,
};
pub use defaults::{DefaultCategories, STANDARD_CATEGORY_NAMES, seed_default_categories};
pub use delete::delete_user_category_endpoint;
pub use domain::{Category, CategoryName, NewCategory, find_by_name};
pub use edit::rename_category_endpoint;
pub use guard::{create_user_category, delete_user_category, rename_category};
pub use list::{get_all_categories_endpoint, get_category_endpoint, get_user_categories_endpoint};
pub use provision::provision_default_categories;
pub(crate) use provision::provision_within_transaction;
