//! Validation utilities for user-supplied registration fields

use once_cell::sync::Lazy;
use regex::Regex;

/// Usernames start with a letter and contain 4-16 alphanumeric/underscore chars
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]{3,15}$").expect("valid username regex"));

/// Minimal structural email check: something@something.something, no whitespace
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Characters accepted in passwords besides letters and digits
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Check whether a username is structurally valid
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Check whether an email address is structurally valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check whether a password meets the structural policy
///
/// 8-24 characters drawn from letters, digits and `@$!%*?&`, with at least
/// one lowercase letter, one uppercase letter, one digit and one special
/// character.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=24).contains(&len) {
        return false;
    }

    let mut has_lower = false;
    let mut has_upper = false;
    let mut has_digit = false;
    let mut has_special = false;

    for c in password.chars() {
        match c {
            'a'..='z' => has_lower = true,
            'A'..='Z' => has_upper = true,
            '0'..='9' => has_digit = true,
            c if PASSWORD_SPECIALS.contains(c) => has_special = true,
            _ => return false,
        }
    }

    has_lower && has_upper && has_digit && has_special
}

/// Obfuscate an email address for display, keeping the first character of
/// the local part and the full domain: `jdoe@example.com` -> `j***@example.com`
pub fn obfuscate_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            let masked: String = chars.map(|_| '*').collect();
            format!("{}{}@{}", first, masked, domain)
        }
        _ => email.to_string(),
    }
}
