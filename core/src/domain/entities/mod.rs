pub mod token;
pub mod user;

pub use token::{Claims, TokenPair};
pub use user::User;
