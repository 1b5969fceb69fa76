//! Users: accounts, credentials, balances and saving goals.

mod balance;
mod db;
mod domain;
mod get;
mod log_in;
mod register;

pub use balance::{
    AmountQuery, BalanceQuery, SavingQuery, add_to_balance, add_to_balance_endpoint, set_balance,
    set_balance_endpoint, set_saving, set_saving_endpoint,
};
pub use db::{
    count_users, create_user, create_user_table, get_user_by_email, get_user_by_id,
    get_user_by_username, update_balance, update_saving,
};
pub use domain::{NewUser, Password, User, UserID};
pub use get::get_user_endpoint;
pub use log_in::{LogInForm, log_in, log_in_endpoint};
pub use register::{RegistrationForm, register_user, register_user_endpoint};
