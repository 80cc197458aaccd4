//! One-time passcode generation and comparison.

use rand::rngs::OsRng;
use rand::Rng;

/// Length of a generated code
pub const CODE_LENGTH: usize = 6;

/// Minimum seconds between two issuances for the same customer
pub const DEFAULT_RESEND_INTERVAL_SECONDS: i64 = 30;

/// Generates a numeric code of `length` digits from the OS random source.
///
/// Leading zeros are kept, so `"004211"` is a valid six digit code.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generates a code guaranteed to differ from `previous`
pub fn generate_distinct_code(length: usize, previous: Option<&str>) -> String {
    loop {
        let code = generate_code(length);
        if length == 0 || previous != Some(code.as_str()) {
            return code;
        }
    }
}

/// Compares a submitted code with the stored one in constant time
pub fn codes_match(stored: &str, submitted: &str) -> bool {
    constant_time_eq::constant_time_eq(stored.as_bytes(), submitted.trim().as_bytes())
}

/// Whether `code` is exactly `length` ASCII digits
pub fn is_well_formed(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = generate_code(CODE_LENGTH);
            assert!(is_well_formed(&code, CODE_LENGTH), "bad code {}", code);
        }
        assert_eq!(generate_code(8).len(), 8);
    }

    #[test]
    fn test_generate_distinct_code() {
        for _ in 0..200 {
            let previous = generate_code(1);
            let next = generate_distinct_code(1, Some(&previous));
            assert_ne!(previous, next);
        }
    }

    #[test]
    fn test_codes_match() {
        assert!(codes_match("123456", "123456"));
        assert!(codes_match("123456", " 123456\n"));
        assert!(!codes_match("123456", "123457"));
        assert!(!codes_match("123456", "12345"));
        assert!(!codes_match("123456", ""));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("000000", 6));
        assert!(!is_well_formed("12a456", 6));
        assert!(!is_well_formed("1234567", 6));
    }
}
