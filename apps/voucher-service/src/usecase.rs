//! # ユースケース層
//!
//! Voucher Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと時刻を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入力の変換のみ行い、判定はユースケースに集約

pub mod voucher;

pub use voucher::VoucherUseCaseImpl;
