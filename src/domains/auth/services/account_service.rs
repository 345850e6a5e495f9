use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domains::auth::models::{RefreshTokenCreate, User};
use crate::domains::auth::services::credentials::{
    generate_refresh_token, hash_password, hash_refresh_token, verify_password,
};
use crate::shared::database::{Database, RefreshTokenRepository, UserRepository};
use crate::shared::errors::{AuthError, is_unique_violation};

/// Refresh Token 유효 기간 (일)
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

// 계정 서비스
// AccountService: user accounts and refresh-token lifecycle
#[derive(Clone)]
pub struct AccountService {
    db: Database,
}

impl AccountService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // 회원가입 (비즈니스 로직)
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        // 1. 이메일 중복 확인
        let existing_user = user_repo
            .get_user_by_email(email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email existence: {:#}", e)))?;

        if existing_user.is_some() {
            return Err(AuthError::EmailAlreadyExists { email: email.to_string() });
        }

        // 2. 비밀번호 해싱
        let hashed_password = hash_password(password)?;

        // 3. 사용자 생성 (동시 가입은 unique 제약으로 걸러짐)
        let user = user_repo
            .create_user(email, &hashed_password)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::EmailAlreadyExists { email: email.to_string() }
                } else {
                    AuthError::DatabaseError(format!("Failed to create user: {:#}", e))
                }
            })?;

        info!(user_id = %user.user_id, "User registered");
        Ok(user)
    }

    // 로그인 검증
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        let user = user_repo
            .get_user_by_email(email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.hashed_password)?;

        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User, AuthError> {
        UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?
            .ok_or(AuthError::UserNotFound { id: user_id })
    }

    /// Refresh Token 생성 및 DB 저장
    /// Issue a refresh token; the caller gets the raw token, the database keeps its digest
    pub async fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());

        let refresh_token = generate_refresh_token();
        let exp = (Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS)).timestamp();

        refresh_token_repo
            .create(RefreshTokenCreate {
                user_id,
                refresh_token: hash_refresh_token(&refresh_token),
                exp,
            })
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create refresh token: {:#}", e)))?;

        Ok(refresh_token)
    }

    /// Refresh Token 1회 사용
    /// Consume a refresh token once and return its owner.
    /// Unknown, used and expired tokens are all `InvalidToken`.
    pub async fn consume_refresh_token(&self, refresh_token: &str) -> Result<User, AuthError> {
        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());
        let token_hash = hash_refresh_token(refresh_token);

        let stored_token = refresh_token_repo
            .find_by_token(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to find refresh token: {:#}", e)))?
            .ok_or(AuthError::InvalidToken)?;

        if stored_token.used {
            warn!(user_id = %stored_token.user_id, "Refresh token presented again after use");
            return Err(AuthError::InvalidToken);
        }

        if stored_token.is_expired(Utc::now().timestamp()) {
            return Err(AuthError::InvalidToken);
        }

        let flipped = refresh_token_repo
            .mark_used(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to mark refresh token as used: {:#}", e)))?;

        // 동시에 다른 요청이 먼저 사용함
        if !flipped {
            return Err(AuthError::InvalidToken);
        }

        self.get_user(stored_token.user_id)
            .await
            .map_err(|e| match e {
                AuthError::UserNotFound { .. } => AuthError::InvalidToken,
                other => other,
            })
    }

    /// 사용자의 모든 Refresh Token 무효화 (모든 기기에서 로그아웃)
    /// Revoke all refresh tokens for user (logout from all devices)
    pub async fn revoke_all_refresh_tokens(&self, user_id: Uuid) -> Result<u64, AuthError> {
        RefreshTokenRepository::new(self.db.pool().clone())
            .mark_all_used_for_user(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke all refresh tokens: {:#}", e)))
    }

    /// 만료 토큰 정리
    pub async fn purge_expired_refresh_tokens(&self) -> Result<u64, AuthError> {
        let deleted = RefreshTokenRepository::new(self.db.pool().clone())
            .delete_expired(Utc::now().timestamp())
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to delete expired refresh tokens: {:#}", e)))?;

        info!(deleted, "Expired refresh tokens purged");
        Ok(deleted)
    }

    /// 계정 삭제 (토큰/역할/감사 로그는 CASCADE)
    pub async fn delete_account(&self, user_id: Uuid) -> Result<(), AuthError> {
        let deleted = UserRepository::new(self.db.pool().clone())
            .delete_user(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to delete user: {:#}", e)))?;

        if !deleted {
            return Err(AuthError::UserNotFound { id: user_id });
        }

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
