//! # リポジトリ実装
//!
//! ユースケース層が依存するストアのトレイトと、その具体実装を提供する。
//!
//! - **依存性逆転**: ユースケースはトレイトにのみ依存し、実装は起動時に注入する
//! - **テスタビリティ**: トレイト経由でモック実装に差し替え可能

pub mod voucher_repository;

pub use voucher_repository::{PostgresVoucherRepository, VoucherRepository};
