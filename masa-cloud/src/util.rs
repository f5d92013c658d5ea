//! Shared utility functions for masa-cloud

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 6-digit numeric code for password reset emails
pub fn generate_code() -> String {
    use rand::Rng;
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// URL-safe slug from a restaurant name, with a short random suffix to
/// keep collisions between same-named restaurants impossible in practice.
pub fn slugify(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            c if c.is_ascii_alphanumeric() => c,
            _ => '-',
        })
        .collect();
    let base: String = base
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let suffix = shared::util::generate_token(6).to_lowercase();
    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("gizli-sifre-123").unwrap();
        assert!(verify_password("gizli-sifre-123", &hash));
        assert!(!verify_password("yanlis-sifre", &hash));
        assert!(!verify_password("gizli-sifre-123", "not-a-hash"));
    }

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..20 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_slugify_transliterates_turkish() {
        let slug = slugify("Çiğköfteci Şükrü Usta");
        assert!(slug.starts_with("cigkofteci-sukru-usta-"));
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn test_slugify_empty_name_still_yields_slug() {
        let slug = slugify("!!!");
        assert!(!slug.is_empty());
    }
}
