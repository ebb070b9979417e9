//! # VoucherRepository
//!
//! バウチャーの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **単純な get/set のみ**: 「存在しなければ作成」「未使用なら使用済みにする」といった
//!   条件付き操作は提供しない。判定はユースケース層が行う
//! - **コードの一意性**: `vouchers.code` の UNIQUE 制約を最終防衛線とする。
//!   違反時は [`InfraErrorKind::Database`](crate::InfraErrorKind::Database) として
//!   そのまま返す

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use promoflow_domain::voucher::{DiscountRate, Voucher, VoucherCode, VoucherId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// バウチャーストア
#[async_trait]
pub trait VoucherRepository: Send + Sync {
   /// コードでバウチャーを検索する（存在しなければ `None`）
   async fn find_by_code(&self, code: &VoucherCode) -> Result<Option<Voucher>, InfraError>;

   /// バウチャーを挿入する
   async fn insert(&self, voucher: &Voucher) -> Result<(), InfraError>;

   /// 指定コードのバウチャーを使用済みにする
   async fn mark_used(&self, code: &VoucherCode) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の VoucherRepository
#[derive(Debug, Clone)]
pub struct PostgresVoucherRepository {
   pool: PgPool,
}

impl PostgresVoucherRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

/// `vouchers` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct VoucherRow {
   id:         Uuid,
   code:       String,
   discount:   f64,
   used:       bool,
   created_at: DateTime<Utc>,
}

impl TryFrom<VoucherRow> for Voucher {
   type Error = InfraError;

   fn try_from(row: VoucherRow) -> Result<Self, Self::Error> {
      let code = VoucherCode::new(row.code)
         .map_err(|e| InfraError::corrupt_data(format!("vouchers.id={}: {e}", row.id)))?;
      let discount = DiscountRate::new(row.discount)
         .map_err(|e| InfraError::corrupt_data(format!("vouchers.id={}: {e}", row.id)))?;

      Ok(Voucher::from_db(
         VoucherId::from_uuid(row.id),
         code,
         discount,
         row.used,
         row.created_at,
      ))
   }
}

#[async_trait]
impl VoucherRepository for PostgresVoucherRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%code))]
   async fn find_by_code(&self, code: &VoucherCode) -> Result<Option<Voucher>, InfraError> {
      let row = sqlx::query_as::<_, VoucherRow>(
         r#"
            SELECT id, code, discount, used, created_at
            FROM vouchers
            WHERE code = $1
            "#,
      )
      .bind(code.as_str())
      .fetch_optional(&self.pool)
      .await?;

      row.map(Voucher::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(code = %voucher.code()))]
   async fn insert(&self, voucher: &Voucher) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO vouchers (id, code, discount, used, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
      )
      .bind(voucher.id().as_uuid())
      .bind(voucher.code().as_str())
      .bind(voucher.discount().as_percent())
      .bind(voucher.is_used())
      .bind(voucher.created_at())
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%code))]
   async fn mark_used(&self, code: &VoucherCode) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            UPDATE vouchers
            SET used = true
            WHERE code = $1
            "#,
      )
      .bind(code.as_str())
      .execute(&self.pool)
      .await?;

      Ok(())
   }
}
