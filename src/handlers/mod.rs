pub mod auth;
pub mod expense;

pub use auth::auth_config;
pub use expense::expense_config;
