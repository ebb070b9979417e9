//! # Voucher Service ライブラリ
//!
//! Voucher Service の設定、ユースケース、ハンドラを公開する。
//! 統合テストからルーターを組み立てられるよう、バイナリとは分けている。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

#[cfg(test)]
pub(crate) mod test_utils;
