//! Email delivery - SMTP via lettre, plus a log-only development stub

pub mod log_only;
pub mod smtp;

pub use log_only::LogOnlyEmailSender;
pub use smtp::SmtpEmailSender;
