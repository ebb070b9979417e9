//! # バウチャーユースケース
//!
//! バウチャーの作成と、注文金額への適用を担当する。
//!
//! ## 適用ルール
//!
//! - 注文金額が 100 を超え、かつ未使用のバウチャーのみ割引する
//! - 割引した場合のみバウチャーを使用済みにする
//! - 割引しない場合も結果は返す（`applied = false`、`final_amount = amount`）
//!
//! 「存在確認 → 書き込み」は 1 つのトランザクションではない。
//! 同じコードへの同時リクエストでは二重作成・二重適用が起こり得る
//! （作成はストアの UNIQUE 制約で弾かれる）。

use std::sync::Arc;

use promoflow_domain::{
   VoucherError,
   clock::Clock,
   voucher::{DiscountRate, OrderDiscount, Voucher, VoucherCode, VoucherId},
};
use promoflow_infra::repository::VoucherRepository;

use crate::error::CoreError;

/// バウチャーユースケース
pub struct VoucherUseCaseImpl {
   voucher_repository: Arc<dyn VoucherRepository>,
   clock: Arc<dyn Clock>,
}

impl VoucherUseCaseImpl {
   pub fn new(voucher_repository: Arc<dyn VoucherRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         voucher_repository,
         clock,
      }
   }

   /// バウチャーを作成する
   ///
   /// 同じコードのバウチャーが既に存在する場合は [`VoucherError::AlreadyExists`]。
   /// 作成したバウチャーは未使用状態で保存される。
   #[tracing::instrument(skip_all, fields(%code, %discount))]
   pub async fn create_voucher(
      &self,
      code: VoucherCode,
      discount: DiscountRate,
   ) -> Result<(), CoreError> {
      if self.voucher_repository.find_by_code(&code).await?.is_some() {
         return Err(VoucherError::AlreadyExists { code }.into());
      }

      let voucher = Voucher::new(VoucherId::new(), code, discount, self.clock.now());
      self.voucher_repository.insert(&voucher).await?;

      tracing::info!(voucher_id = %voucher.id(), "バウチャーを作成しました");
      Ok(())
   }

   /// 注文金額にバウチャーを適用する
   ///
   /// コードが存在しない場合は [`VoucherError::NotFound`]。
   /// 割引条件を満たさない場合はエラーにせず、`applied = false` の結果を返す。
   #[tracing::instrument(skip_all, fields(%code, amount = amount))]
   pub async fn apply_voucher(
      &self,
      code: VoucherCode,
      amount: f64,
   ) -> Result<OrderDiscount, CoreError> {
      let voucher = self
         .voucher_repository
         .find_by_code(&code)
         .await?
         .ok_or(VoucherError::NotFound { code })?;

      let result = voucher.apply_to(amount);

      if result.applied() {
         self.voucher_repository.mark_used(voucher.code()).await?;
         tracing::info!(
            final_amount = result.final_amount(),
            "バウチャーを適用しました"
         );
      } else {
         tracing::debug!(
            used = voucher.is_used(),
            "割引条件を満たさないため適用しません"
         );
      }

      Ok(result)
   }
}
