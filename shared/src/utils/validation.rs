//! Email validation and formatting helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Lowercase and trim an email so lookups match however it was typed
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check an email address against a practical RFC 5322 subset
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Mask an email for logs: `jane.doe@example.com` becomes `j***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => String::from("***"),
    }
}
