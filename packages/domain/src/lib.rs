//! # PromoFlow ドメイン層
//!
//! バウチャー（割引コード）の検証と割引適用ルールを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 生成時に検証し、不正な値を型レベルで排除する
//!   （[`VoucherCode`](voucher::VoucherCode), [`DiscountRate`](voucher::DiscountRate)）
//! - **エンティティ**: 割引適用の判定は [`Voucher`](voucher::Voucher) 自身が持つ
//! - **ドメインエラー**: 入力検証エラーとバウチャー業務エラーを型で分ける
//!
//! ## 依存関係の方向
//!
//! ```text
//! voucher-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use promoflow_domain::voucher::{DiscountRate, Voucher, VoucherCode, VoucherId};
//!
//! let voucher = Voucher::new(
//!    VoucherId::new(),
//!    VoucherCode::new("SUMMER70").unwrap(),
//!    DiscountRate::new(70.0).unwrap(),
//!    chrono::Utc::now(),
//! );
//!
//! let order = voucher.apply_to(1000.0);
//! assert!(order.applied());
//! assert_eq!(order.final_amount(), 300.0);
//! ```

pub mod clock;
pub mod error;
pub mod voucher;

pub use error::{ConflictPayload, DomainError, VoucherError};
