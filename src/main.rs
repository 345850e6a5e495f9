use anyhow::{Context, Result};
use tracing::info;

use identity_api::config::Settings;
use identity_api::shared::database::Database;
use identity_api::shared::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // 설정 로드 (기본값 -> config/default.* -> APP_* 환경변수)
    let settings = Settings::load().context("Failed to load settings")?;
    init_tracing(&settings);

    // DB 연결
    let db = Database::connect(&settings).await?;

    // 스키마 마이그레이션
    db.initialize().await?;

    info!("Identity schema is up to date");
    Ok(())
}
