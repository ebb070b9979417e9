//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! promoflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use promoflow_domain::voucher::{Voucher, VoucherCode};

use crate::{error::InfraError, repository::VoucherRepository};

// ===== MockVoucherRepository =====

#[derive(Clone, Default)]
pub struct MockVoucherRepository {
   vouchers:   Arc<Mutex<Vec<Voucher>>>,
   inserted:   Arc<Mutex<Vec<Voucher>>>,
   used_codes: Arc<Mutex<Vec<VoucherCode>>>,
   failure:    Option<String>,
}

impl MockVoucherRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 初期データを持つモックを作成する
   pub fn with_vouchers(vouchers: impl IntoIterator<Item = Voucher>) -> Self {
      let mock = Self::new();
      for voucher in vouchers {
         mock.add_voucher(voucher);
      }
      mock
   }

   /// すべての操作が失敗するモックを作成する
   pub fn failing(msg: impl Into<String>) -> Self {
      Self {
         failure: Some(msg.into()),
         ..Self::default()
      }
   }

   pub fn add_voucher(&self, voucher: Voucher) {
      self.vouchers.lock().unwrap().push(voucher);
   }

   /// 現在保持しているバウチャーを取得する
   pub fn find(&self, code: &str) -> Option<Voucher> {
      self
         .vouchers
         .lock()
         .unwrap()
         .iter()
         .find(|v| v.code().as_str() == code)
         .cloned()
   }

   /// `insert` に渡されたバウチャー（呼び出し順）
   pub fn inserted(&self) -> Vec<Voucher> {
      self.inserted.lock().unwrap().clone()
   }

   /// `mark_used` に渡されたコード（呼び出し順）
   pub fn used_codes(&self) -> Vec<VoucherCode> {
      self.used_codes.lock().unwrap().clone()
   }

   fn check_failure(&self) -> Result<(), InfraError> {
      match &self.failure {
         Some(msg) => Err(InfraError::unexpected(msg.clone())),
         None => Ok(()),
      }
   }
}

#[async_trait]
impl VoucherRepository for MockVoucherRepository {
   async fn find_by_code(&self, code: &VoucherCode) -> Result<Option<Voucher>, InfraError> {
      self.check_failure()?;
      Ok(self
         .vouchers
         .lock()
         .unwrap()
         .iter()
         .find(|v| v.code() == code)
         .cloned())
   }

   async fn insert(&self, voucher: &Voucher) -> Result<(), InfraError> {
      self.check_failure()?;
      self.vouchers.lock().unwrap().push(voucher.clone());
      self.inserted.lock().unwrap().push(voucher.clone());
      Ok(())
   }

   async fn mark_used(&self, code: &VoucherCode) -> Result<(), InfraError> {
      self.check_failure()?;
      let mut vouchers = self.vouchers.lock().unwrap();
      if let Some(pos) = vouchers.iter().position(|v| v.code() == code) {
         let used = vouchers[pos].clone().into_used();
         vouchers[pos] = used;
      }
      self.used_codes.lock().unwrap().push(code.clone());
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use chrono::DateTime;
   use pretty_assertions::assert_eq;
   use promoflow_domain::voucher::{DiscountRate, VoucherId};

   use super::*;

   fn voucher(code: &str) -> Voucher {
      Voucher::new(
         VoucherId::new(),
         VoucherCode::new(code).unwrap(),
         DiscountRate::new(70.0).unwrap(),
         DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
      )
   }

   #[tokio::test]
   async fn test_mark_usedで保持中のバウチャーが使用済みになる() {
      let sut = MockVoucherRepository::with_vouchers([voucher("MOCKCODE")]);
      let code = VoucherCode::new("MOCKCODE").unwrap();

      sut.mark_used(&code).await.unwrap();

      assert!(sut.find("MOCKCODE").unwrap().is_used());
      assert_eq!(sut.used_codes(), vec![code]);
   }

   #[tokio::test]
   async fn test_failingはすべての操作でエラーを返す() {
      let sut = MockVoucherRepository::failing("ストア停止中");
      let code = VoucherCode::new("MOCKCODE").unwrap();

      assert!(sut.find_by_code(&code).await.is_err());
      assert!(sut.insert(&voucher("MOCKCODE")).await.is_err());
      assert!(sut.mark_used(&code).await.is_err());
      assert!(sut.inserted().is_empty());
   }
}
