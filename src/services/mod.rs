pub mod auth_service;
pub mod expense_service;

pub use auth_service::*;
pub use expense_service::*;
