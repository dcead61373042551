//! # Authentication support
//!
//! Session key shared by every server function, Argon2id password hashing for
//! the email + password flow, and the optional signup domain allow-list.

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Registration domain allow-list, from `SIGNUP_ALLOWED_DOMAIN`.
///
/// When set (e.g. `example.com`), only `@example.com` addresses may register.
/// The policy is an external configuration input; unset means open signup.
#[cfg(feature = "server")]
pub fn allowed_domain() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("SIGNUP_ALLOWED_DOMAIN")
        .ok()
        .map(|d| d.trim().trim_start_matches('@').to_lowercase())
        .filter(|d| !d.is_empty())
}

/// Check an (already lowercased) email against the allow-list. Returns the
/// rejection message when the domain does not match.
#[cfg(feature = "server")]
pub fn check_signup_domain(email: &str) -> Result<(), String> {
    let Some(domain) = allowed_domain() else {
        return Ok(());
    };
    let suffix = format!("@{domain}");
    if email.ends_with(&suffix) {
        Ok(())
    } else {
        Err(format!("Only {suffix} addresses are allowed"))
    }
}

#[cfg(feature = "server")]
mod password {
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    /// Hash a password using Argon2id. Returns a PHC-format string.
    pub fn hash_password(password: &str) -> Result<String, String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| format!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a PHC-format hash string.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
