//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは入力を値オブジェクトに変換するだけに留め、判定はユースケースに委譲

pub mod health;
pub mod voucher;

pub use health::{ReadinessState, health_check, readiness_check};
pub use voucher::{
   ApplyVoucherRequest,
   CreateVoucherRequest,
   VoucherState,
   apply_voucher,
   create_voucher,
};
