pub mod common;
pub mod pagination;
pub mod transaction;
pub mod user;

pub use common::*;
pub use pagination::*;
pub use transaction::*;
pub use user::*;
