//! # バウチャーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /vouchers` - バウチャー作成
//! - `POST /vouchers/apply` - 注文金額へのバウチャー適用

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use promoflow_domain::voucher::{DiscountRate, VoucherCode};
use promoflow_shared::ApiResponse;
use serde::Deserialize;

use crate::{error::CoreError, usecase::VoucherUseCaseImpl};

/// バウチャー API の共有状態
pub struct VoucherState {
   pub usecase: VoucherUseCaseImpl,
}

// --- リクエスト型 ---

/// バウチャー作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateVoucherRequest {
   pub code:     String,
   pub discount: f64,
}

/// バウチャー適用リクエスト
#[derive(Debug, Deserialize)]
pub struct ApplyVoucherRequest {
   pub code:   String,
   pub amount: f64,
}

// --- ハンドラ ---

/// POST /vouchers
///
/// ## レスポンス
///
/// - `201 Created`: 作成成功（ボディなし）
/// - `400 Bad Request`: コードが空、または割引率が 0〜100 の範囲外
/// - `409 Conflict`: 同じコードのバウチャーが既に存在する
#[tracing::instrument(skip_all)]
pub async fn create_voucher(
   State(state): State<Arc<VoucherState>>,
   Json(req): Json<CreateVoucherRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let code = VoucherCode::new(req.code)?;
   let discount = DiscountRate::new(req.discount)?;

   state.usecase.create_voucher(code, discount).await?;

   Ok(StatusCode::CREATED)
}

/// POST /vouchers/apply
///
/// ## レスポンス
///
/// - `200 OK`: 適用結果（割引しなかった場合も `applied: false` で返す）
/// - `400 Bad Request`: コードが空
/// - `409 Conflict`: バウチャーが存在しない
#[tracing::instrument(skip_all)]
pub async fn apply_voucher(
   State(state): State<Arc<VoucherState>>,
   Json(req): Json<ApplyVoucherRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let code = VoucherCode::new(req.code)?;

   let result = state.usecase.apply_voucher(code, req.amount).await?;

   Ok((StatusCode::OK, Json(ApiResponse::new(result))))
}
