use thiserror::Error;
use uuid::Uuid;

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 이메일이 이미 존재함
    /// Email already exists
    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    /// 잘못된 이메일 또는 비밀번호
    /// Invalid email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: Uuid },

    /// 비밀번호 해싱 실패
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    /// 비밀번호 검증 실패
    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    PasswordVerificationFailed(String),

    /// 잘못된, 사용된 또는 만료된 토큰
    /// Unknown, already used or expired refresh token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}
