/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Calendar date (UTC) for an epoch-millis timestamp.
///
/// Daily aggregates are keyed by this value, so two timestamps on the
/// same UTC calendar day always map to the same bucket regardless of
/// the server's local timezone. Falls back to the Unix epoch date if
/// the timestamp is outside chrono's representable range.
pub fn millis_to_date(ts_ms: i64) -> chrono::NaiveDate {
    chrono::DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.date_naive())
        .unwrap_or(chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default())
}

/// Generate a random alphanumeric token.
///
/// Used for session tokens, QR tokens and password reset links.
pub fn generate_token(len: usize) -> String {
    use rand::Rng;
    use rand::distributions::Alphanumeric;
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Hex-encoded SHA-256 digest.
///
/// Opaque tokens are stored hashed so a leaked table cannot be replayed.
pub fn sha256_hex(input: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_date() {
        let date = millis_to_date(1_710_524_712_345);
        assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_same_day_timestamps_share_a_bucket() {
        // 00:00:00.000 and 23:59:59.999 on the same UTC day
        let midnight = 1_710_460_800_000; // 2024-03-15 00:00:00 UTC
        let end_of_day = midnight + 86_400_000 - 1;
        assert_eq!(millis_to_date(midnight), millis_to_date(end_of_day));
        // First millisecond of the next day starts a new bucket
        assert_ne!(millis_to_date(midnight), millis_to_date(end_of_day + 1));
    }

    #[test]
    fn test_generate_token_length_and_charset() {
        let token = generate_token(32);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_sha256_hex_is_stable() {
        let a = sha256_hex("masa");
        let b = sha256_hex("masa");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, sha256_hex("mesa"));
    }
}
