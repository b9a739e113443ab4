//! Common validation utilities
//!
//! Field-level checks shared between the DTO layer and the domain services.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,50}$").expect("valid username regex"));

/// Check if an email address is structurally valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check if a username is valid (3-50 chars, alphanumeric plus `_ . -`)
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Check if a URL is valid (basic scheme check)
pub fn is_valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Check if a string length is within bounds
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}
