//! # Voucher Service エラー定義
//!
//! Voucher Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Voucher` | 409 | `{ "message": ..., "type": "conflict" }` |
//! | `Validation` | 400 | RFC 9457 Problem Details |
//! | `Database` | 500 | RFC 9457 Problem Details（詳細はログのみ） |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use promoflow_domain::{DomainError, VoucherError};
use promoflow_infra::InfraError;
use promoflow_shared::ErrorResponse;
use thiserror::Error;

/// Voucher Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
   /// バウチャーの業務エラー（重複作成、存在しないコードの適用）
   #[error(transparent)]
   Voucher(#[from] VoucherError),

   /// 入力値の検証エラー
   #[error(transparent)]
   Validation(#[from] DomainError),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),
}

impl IntoResponse for CoreError {
   fn into_response(self) -> Response {
      match self {
         CoreError::Voucher(e) => {
            tracing::info!(code = %e.code(), "{}", e);
            (StatusCode::CONFLICT, Json(e.payload())).into_response()
         }
         CoreError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation_error(e.to_string())),
         )
            .into_response(),
         CoreError::Database(e) => {
            tracing::error!(
               error.category = "infrastructure",
               error.kind = "database",
               span_trace = %e.span_trace(),
               "データベースエラー: {}",
               e
            );
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               Json(ErrorResponse::internal_error()),
            )
               .into_response()
         }
      }
   }
}
