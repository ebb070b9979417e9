//! # Voucher Service 設定
//!
//! 環境変数から Voucher Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 必須の環境変数が設定されていない
   #[error("{0} が設定されていません（.env を確認してください）")]
   Missing(&'static str),

   /// 環境変数の値が不正
   #[error("{name} の値が不正です: {value}")]
   Invalid { name: &'static str, value: String },
}

/// Voucher Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherServiceConfig {
   /// バインドアドレス
   pub host:         String,
   /// ポート番号
   pub port:         u16,
   /// データベース接続 URL
   pub database_url: String,
}

impl VoucherServiceConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の変数ソースから設定を読み込む
   ///
   /// 空文字列は未設定として扱う。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

      let host = get("VOUCHER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
      let port_raw = get("VOUCHER_PORT").ok_or(ConfigError::Missing("VOUCHER_PORT"))?;
      let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
         name:  "VOUCHER_PORT",
         value: port_raw.clone(),
      })?;
      let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

      Ok(Self {
         host,
         port,
         database_url,
      })
   }

   /// `host:port` 形式のバインドアドレス
   pub fn bind_address(&self) -> String {
      format!("{}:{}", self.host, self.port)
   }
}
