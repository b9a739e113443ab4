//! # Infrastructure Layer
//!
//! Concrete implementations behind the domain seams of `fs_core`:
//!
//! - **Database**: MySQL `UserRepository` using SQLx, including the
//!   conditional refresh-token rotation
//! - **Email**: SMTP delivery via lettre, plus a log-only development stub
//! - **Security**: bcrypt password hashing

pub mod database;
pub mod email;
pub mod security;

pub use database::mysql::MySqlUserRepository;
pub use email::{LogOnlyEmailSender, SmtpEmailSender};
pub use security::BcryptPasswordHasher;
