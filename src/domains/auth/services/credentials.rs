// 비밀번호 / Refresh Token 해싱 유틸리티
// Password and refresh-token hashing helpers
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};

use crate::shared::errors::AuthError;

/// Refresh Token 길이
pub const REFRESH_TOKEN_LENGTH: usize = 64;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHashingFailed(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// 비밀번호 검증
/// A mismatch is `InvalidCredentials`; a malformed stored hash is `PasswordVerificationFailed`.
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::PasswordVerificationFailed(format!("Invalid password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)?;

    Ok(())
}

/// Refresh Token 생성 (랜덤 문자열, 원본은 클라이언트에게만 전달)
/// Generate a random refresh token; only its digest is stored
pub fn generate_refresh_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Refresh Token 해싱 (DB 저장용)
/// Hash Refresh Token (for database storage)
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(hash.len() <= 128, "hash must fit hashed_password column");
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn malformed_hash_is_a_verification_failure() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::PasswordVerificationFailed(_))
        ));
    }

    #[test]
    fn refresh_tokens_are_random_alphanumeric() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_eq!(a.len(), REFRESH_TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn refresh_token_digest_is_stable_hex() {
        let digest = hash_refresh_token("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_refresh_token("abc"), digest);
    }
}
