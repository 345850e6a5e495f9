/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// 유니크 제약 위반 여부 확인
/// Whether a repository error was caused by a unique constraint violation
///
/// Repositories wrap `sqlx::Error` with context, so the whole chain is searched.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .and_then(|db| db.code())
            .is_some_and(|code| code == UNIQUE_VIOLATION)
    })
}
