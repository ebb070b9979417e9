//! # ヘルスチェックハンドラ
//!
//! - `GET /health` - Liveness（プロセスが応答できるか）
//! - `GET /health/ready` - Readiness（データベースに到達できるか）

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use promoflow_infra::db;
use promoflow_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
use sqlx::PgPool;

/// データベース疎通確認のタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
///
/// データベースへの接続は確認せず、アプリケーション自体の起動状態のみを返す。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse {
      status:  "healthy".to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
   })
}

/// Readiness Check 用の State
pub struct ReadinessState {
   pub pool: PgPool,
}

/// Readiness Check エンドポイント
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
   let mut checks = HashMap::new();
   checks.insert("database".to_string(), check_database(&state.pool).await);

   let response = ReadinessResponse::from_checks(checks);
   let http_status = match response.status {
      ReadinessStatus::Ready => StatusCode::OK,
      ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
   };

   (http_status, Json(response))
}

/// データベースへの接続を `SELECT 1` で確認する
async fn check_database(pool: &PgPool) -> CheckStatus {
   match tokio::time::timeout(CHECK_TIMEOUT, db::ping(pool)).await {
      Ok(Ok(())) => CheckStatus::Ok,
      Ok(Err(e)) => {
         tracing::warn!(error = %e, "readiness check: database ping failed");
         CheckStatus::Error
      }
      Err(_) => {
         tracing::warn!("readiness check: database check timed out");
         CheckStatus::Error
      }
   }
}
