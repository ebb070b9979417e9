//! # Voucher Service サーバー
//!
//! プロモーション用バウチャーの作成と、注文金額への適用を提供する API サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | GET | `/health` | Liveness |
//! | GET | `/health/ready` | Readiness（データベース疎通） |
//! | POST | `/vouchers` | バウチャー作成 |
//! | POST | `/vouchers/apply` | バウチャー適用 |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `VOUCHER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `VOUCHER_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,promoflow=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! VOUCHER_PORT=13002 DATABASE_URL=postgres://... cargo run -p promoflow-voucher-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use axum::{
   Router,
   routing::{get, post},
};
use promoflow_domain::clock::SystemClock;
use promoflow_infra::{db, repository::PostgresVoucherRepository};
use promoflow_shared::observability::{TracingConfig, init_tracing};
use promoflow_voucher_service::{
   config::VoucherServiceConfig,
   handler::{
      ReadinessState,
      VoucherState,
      apply_voucher,
      create_voucher,
      health_check,
      readiness_check,
   },
   usecase::VoucherUseCaseImpl,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Voucher Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("voucher-service");
   init_tracing(&tracing_config);
   let _tracing_guard = tracing_config.root_span().entered();

   // 設定読み込み
   let config = VoucherServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Voucher Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成し、マイグレーションを適用
   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   db::run_migrations(&pool)
      .await
      .context("マイグレーションの適用に失敗しました")?;
   tracing::info!("データベースに接続しました");

   // 依存コンポーネントを初期化
   let voucher_repository = Arc::new(PostgresVoucherRepository::new(pool.clone()));
   let clock = Arc::new(SystemClock);
   let voucher_state = Arc::new(VoucherState {
      usecase: VoucherUseCaseImpl::new(voucher_repository, clock),
   });
   let readiness_state = Arc::new(ReadinessState { pool });

   // ルーター構築
   let app = Router::new()
      .route("/health", get(health_check))
      .route(
         "/health/ready",
         get(readiness_check).with_state(readiness_state),
      )
      .route("/vouchers", post(create_voucher))
      .route("/vouchers/apply", post(apply_voucher))
      .with_state(voucher_state)
      .layer(TraceLayer::new_for_http());

   // サーバー起動
   let addr: SocketAddr = config
      .bind_address()
      .parse()
      .with_context(|| format!("アドレスのパースに失敗しました: {}", config.bind_address()))?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Voucher Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
