//! Domain entities

pub mod token;
pub mod user;

pub use token::{Claims, IssuedToken, TokenOutput, TOKEN_TYPE};
pub use user::UserAttributes;
