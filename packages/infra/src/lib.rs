//! # PromoFlow インフラ層
//!
//! バウチャーストア（永続化）の具体実装を提供する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ**: [`VoucherRepository`](repository::VoucherRepository) トレイトと PostgreSQL 実装
//! - **テスト支援**: `test-utils` feature でインメモリのモックリポジトリを公開
//!
//! ## 依存関係
//!
//! ```text
//! voucher-service → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use promoflow_infra::{db, repository::PostgresVoucherRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/promoflow").await?;
//!     db::run_migrations(&pool).await?;
//!     let repository = PostgresVoucherRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
