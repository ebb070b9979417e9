//! # バウチャー（割引コード）
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Voucher`] | バウチャー | コード・割引率・使用済みフラグを持つ単回利用の割引券 |
//! | [`VoucherCode`] | バウチャーコード | バウチャーを一意に識別する文字列 |
//! | [`DiscountRate`] | 割引率 | 0〜100 のパーセント値 |
//! | [`OrderDiscount`] | 割引適用結果 | 注文金額にバウチャーを適用した結果（永続化しない） |
//!
//! ## 適用条件
//!
//! 割引が適用されるのは、注文金額が [`MINIMUM_ORDER_AMOUNT`] を**超え**、
//! かつバウチャーが未使用の場合のみ。ちょうど 100 は対象外。
//! 適用されなかった場合も、結果には割引率を載せて返す。

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// 割引が適用される注文金額の下限（この値ちょうどは対象外）
pub const MINIMUM_ORDER_AMOUNT: f64 = 100.0;

/// バウチャーコードの最大文字数
const CODE_MAX_LENGTH: usize = 255;

/// バウチャー ID（一意識別子）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct VoucherId(Uuid);

impl VoucherId {
   /// 新しいバウチャー ID を生成する（UUID v7）
   pub fn new() -> Self {
      Self(Uuid::now_v7())
   }

   pub fn from_uuid(uuid: Uuid) -> Self {
      Self(uuid)
   }

   pub fn as_uuid(&self) -> &Uuid {
      &self.0
   }
}

impl Default for VoucherId {
   fn default() -> Self {
      Self::new()
   }
}

/// バウチャーコード（値オブジェクト）
///
/// 大文字小文字や前後の空白は正規化しない。入力された文字列がそのまま識別子になる。
///
/// # バリデーション
///
/// - 空文字列・空白のみは不可
/// - 最大 255 文字
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
pub struct VoucherCode(String);

impl VoucherCode {
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();

      if value.trim().is_empty() {
         return Err(DomainError::Validation(
            "バウチャーコードは必須です".to_string(),
         ));
      }
      if value.chars().count() > CODE_MAX_LENGTH {
         return Err(DomainError::Validation(format!(
            "バウチャーコードは {CODE_MAX_LENGTH} 文字以内で指定してください"
         )));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// 割引率（パーセント、値オブジェクト）
///
/// 0〜100 の有限な数値で保持する。小数（例: 12.5%）も許容し、
/// 0 は「割引なし」のバウチャーとして扱う。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)]
#[serde(try_from = "f64")]
#[display("{_0}%")]
pub struct DiscountRate(f64);

impl DiscountRate {
   /// 割引率の上限（100%）
   pub const MAX: f64 = 100.0;

   /// 割引率を作成する
   ///
   /// NaN・無限大・範囲外の値は [`DomainError::Validation`]。
   pub fn new(percent: f64) -> Result<Self, DomainError> {
      if !(0.0..=Self::MAX).contains(&percent) {
         return Err(DomainError::Validation(format!(
            "割引率は 0 から {} の範囲で指定してください: {percent}",
            Self::MAX
         )));
      }
      Ok(Self(percent))
   }

   pub fn as_percent(self) -> f64 {
      self.0
   }

   /// 割引額を差し引いた金額を計算する
   ///
   /// `amount - amount * (percent / 100)`。丸めは行わない。
   pub fn discounted(self, amount: f64) -> f64 {
      amount - amount * (self.0 / 100.0)
   }
}

impl TryFrom<f64> for DiscountRate {
   type Error = DomainError;

   fn try_from(value: f64) -> Result<Self, Self::Error> {
      Self::new(value)
   }
}

/// バウチャーエンティティ
///
/// # 不変条件
///
/// - 作成時は未使用（`used == false`）
/// - 使用済みから未使用に戻す操作は存在しない
#[derive(Debug, Clone, PartialEq)]
pub struct Voucher {
   id:         VoucherId,
   code:       VoucherCode,
   discount:   DiscountRate,
   used:       bool,
   created_at: DateTime<Utc>,
}

impl Voucher {
   /// 未使用のバウチャーを作成する
   pub fn new(
      id: VoucherId,
      code: VoucherCode,
      discount: DiscountRate,
      now: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         code,
         discount,
         used: false,
         created_at: now,
      }
   }

   /// 既存のデータからバウチャーを復元する（データベースから取得時）
   pub fn from_db(
      id: VoucherId,
      code: VoucherCode,
      discount: DiscountRate,
      used: bool,
      created_at: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         code,
         discount,
         used,
         created_at,
      }
   }

   pub fn id(&self) -> &VoucherId {
      &self.id
   }

   pub fn code(&self) -> &VoucherCode {
      &self.code
   }

   pub fn discount(&self) -> DiscountRate {
      self.discount
   }

   pub fn is_used(&self) -> bool {
      self.used
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   /// 指定金額の注文にこのバウチャーの割引を適用できるか判定する
   pub fn is_applicable_to(&self, amount: f64) -> bool {
      !self.used && amount > MINIMUM_ORDER_AMOUNT
   }

   /// 注文金額に割引を適用した結果を計算する
   ///
   /// 判定と計算のみを行い、自身の状態は変更しない。
   /// 適用された場合の使用済み化は呼び出し側が永続化する。
   pub fn apply_to(&self, amount: f64) -> OrderDiscount {
      if self.is_applicable_to(amount) {
         OrderDiscount::with_discount(amount, self.discount)
      } else {
         OrderDiscount::without_discount(amount, self.discount)
      }
   }

   /// 使用済みにしたバウチャーを返す
   pub fn into_used(self) -> Self {
      Self { used: true, ..self }
   }
}

/// 割引適用結果（値オブジェクト）
///
/// ワイヤ上は `{ "amount", "discount", "finalAmount", "applied" }`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDiscount {
   amount:       f64,
   discount:     DiscountRate,
   final_amount: f64,
   applied:      bool,
}

impl OrderDiscount {
   /// 割引を差し引いた結果
   pub fn with_discount(amount: f64, discount: DiscountRate) -> Self {
      Self {
         amount,
         discount,
         final_amount: discount.discounted(amount),
         applied: true,
      }
   }

   /// 割引を差し引かなかった結果（`final_amount == amount`）
   pub fn without_discount(amount: f64, discount: DiscountRate) -> Self {
      Self {
         amount,
         discount,
         final_amount: amount,
         applied: false,
      }
   }

   pub fn amount(&self) -> f64 {
      self.amount
   }

   pub fn discount(&self) -> DiscountRate {
      self.discount
   }

   pub fn final_amount(&self) -> f64 {
      self.final_amount
   }

   pub fn applied(&self) -> bool {
      self.applied
   }
}
