//! # ドメイン層エラー定義
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `DomainError::Validation` | 400 Bad Request | 値オブジェクト生成時の検証失敗 |
//! | `VoucherError::AlreadyExists` | 409 Conflict | 同じコードのバウチャーが既に存在 |
//! | `VoucherError::NotFound` | 409 Conflict | 適用対象のバウチャーが存在しない |
//!
//! ## `"conflict"` ラベルについて
//!
//! 既存クライアントはエラーを `{ "message": ..., "type": "conflict" }` で受け取り、
//! `type == "conflict"` で分岐する。「存在しない」は本来 not-found だが、
//! この契約に合わせてワイヤ上は両方とも `"conflict"` として返す。
//! 内部では [`VoucherError`] の別バリアントとして区別する。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voucher::VoucherCode;

/// 値オブジェクトの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// 入力値がビジネスルールに違反している
   ///
   /// - コードが空、または長すぎる
   /// - 割引率が 0〜100 の範囲外
   #[error("バリデーションエラー: {0}")]
   Validation(String),
}

/// バウチャー業務エラー
///
/// `Display` の文言はクライアントに表示される `message` そのもの。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
   /// 作成しようとしたコードのバウチャーが既に存在する
   #[error("Voucher already exist.")]
   AlreadyExists { code: VoucherCode },

   /// 適用しようとしたコードのバウチャーが存在しない
   #[error("Voucher does not exist.")]
   NotFound { code: VoucherCode },
}

impl VoucherError {
   /// ワイヤ上のエラー種別ラベル（全バリアント共通）
   pub const WIRE_TYPE: &'static str = "conflict";

   /// エラーの対象となったバウチャーコード
   pub fn code(&self) -> &VoucherCode {
      match self {
         Self::AlreadyExists { code } | Self::NotFound { code } => code,
      }
   }

   /// クライアント互換のエラーペイロードに変換する
   pub fn payload(&self) -> ConflictPayload {
      ConflictPayload {
         message:    self.to_string(),
         error_type: Self::WIRE_TYPE.to_string(),
      }
   }
}

/// クライアント互換のエラーペイロード `{ "message": ..., "type": "conflict" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPayload {
   pub message:    String,
   #[serde(rename = "type")]
   pub error_type: String,
}
