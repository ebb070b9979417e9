//! バウチャー API 統合テスト
//!
//! インメモリのモックリポジトリでルーターを組み立て、
//! HTTP リクエストからレスポンスボディまでを検証する。
//!
//! ## テストケース
//!
//! - 作成 → 適用で割引され、2 回目は割引されない
//! - 小数を含む割引率で作成・適用できる
//! - 重複作成・存在しないコードの適用が 409 + 互換ペイロードになる
//! - 100 以下の注文金額には適用されない
//! - 不正な入力が 400 になる
//! - ストア障害が 500 になる

use std::sync::Arc;

use axum::{
   Router,
   body::{Body, to_bytes},
   http::{Method, Request, StatusCode, header},
   routing::{get, post},
};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use promoflow_domain::{
   clock::FixedClock,
   voucher::{DiscountRate, Voucher, VoucherCode, VoucherId},
};
use promoflow_infra::mock::MockVoucherRepository;
use promoflow_voucher_service::{
   handler::{VoucherState, apply_voucher, create_voucher, health_check},
   usecase::VoucherUseCaseImpl,
};
use rstest::rstest;
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

// --- テストヘルパー ---

fn fixed_now() -> DateTime<Utc> {
   DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用 Voucher Service アプリケーションを構築する
fn create_test_app(repo: &MockVoucherRepository) -> Router {
   let clock = Arc::new(FixedClock::new(fixed_now()));
   let usecase = VoucherUseCaseImpl::new(Arc::new(repo.clone()), clock);
   let state = Arc::new(VoucherState { usecase });

   Router::new()
      .route("/health", get(health_check))
      .route("/vouchers", post(create_voucher))
      .route("/vouchers/apply", post(apply_voucher))
      .with_state(state)
}

fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
   Request::builder()
      .method(Method::POST)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
   let response = app.clone().oneshot(request).await.unwrap();
   let status = response.status();
   let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
   (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
   let (status, bytes) = send(app, request).await;
   (status, serde_json::from_slice(&bytes).unwrap())
}

fn stored_voucher(code: &str, percent: f64) -> Voucher {
   Voucher::new(
      VoucherId::new(),
      VoucherCode::new(code).unwrap(),
      DiscountRate::new(percent).unwrap(),
      fixed_now(),
   )
}

// --- テストケース ---

#[tokio::test]
async fn test_healthは200を返す() {
   let sut = create_test_app(&MockVoucherRepository::new());
   let request = Request::builder()
      .uri("/health")
      .body(Body::empty())
      .unwrap();

   let (status, body) = send_json(&sut, request).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_作成したバウチャーを適用すると割引され2回目は割引されない() {
   let repo = MockVoucherRepository::new();
   let sut = create_test_app(&repo);

   // 作成
   let (status, body) = send(
      &sut,
      post_json("/vouchers", &json!({ "code": "MOCKCODE", "discount": 70 })),
   )
   .await;
   assert_eq!(status, StatusCode::CREATED);
   assert!(body.is_empty());

   let created = repo.find("MOCKCODE").unwrap();
   assert!(!created.is_used());
   assert_eq!(created.created_at(), fixed_now());

   // 1 回目の適用
   let (status, body) = send_json(
      &sut,
      post_json(
         "/vouchers/apply",
         &json!({ "code": "MOCKCODE", "amount": 1000 }),
      ),
   )
   .await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      body,
      json!({
         "data": {
            "amount": 1000.0,
            "discount": 70.0,
            "finalAmount": 300.0,
            "applied": true
         }
      })
   );
   assert!(repo.find("MOCKCODE").unwrap().is_used());

   // 2 回目の適用
   let (status, body) = send_json(
      &sut,
      post_json(
         "/vouchers/apply",
         &json!({ "code": "MOCKCODE", "amount": 1000 }),
      ),
   )
   .await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["data"]["finalAmount"], 1000.0);
   assert_eq!(body["data"]["applied"], false);
}

#[tokio::test]
async fn test_既存コードの作成は409と互換ペイロードを返す() {
   let repo = MockVoucherRepository::with_vouchers([stored_voucher("MOCKCODE", 70.0)]);
   let sut = create_test_app(&repo);

   let (status, body) = send_json(
      &sut,
      post_json("/vouchers", &json!({ "code": "MOCKCODE", "discount": 10 })),
   )
   .await;

   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(
      body,
      json!({ "message": "Voucher already exist.", "type": "conflict" })
   );
   assert!(repo.inserted().is_empty());
}

#[tokio::test]
async fn test_存在しないコードの適用は409と互換ペイロードを返す() {
   let sut = create_test_app(&MockVoucherRepository::new());

   let (status, body) = send_json(
      &sut,
      post_json(
         "/vouchers/apply",
         &json!({ "code": "UNKNOWN", "amount": 1000 }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(
      body,
      json!({ "message": "Voucher does not exist.", "type": "conflict" })
   );
}

#[rstest]
#[case::境界値(100.0)]
#[case::境界値未満(50.5)]
#[case::負の金額(-20.0)]
#[tokio::test]
async fn test_100以下の注文金額には適用されない(#[case] amount: f64) {
   let repo = MockVoucherRepository::with_vouchers([stored_voucher("MOCKCODE", 70.0)]);
   let sut = create_test_app(&repo);

   let (status, body) = send_json(
      &sut,
      post_json(
         "/vouchers/apply",
         &json!({ "code": "MOCKCODE", "amount": amount }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      body["data"],
      json!({
         "amount": amount,
         "discount": 70.0,
         "finalAmount": amount,
         "applied": false
      })
   );
   assert!(repo.used_codes().is_empty());
}

#[rstest]
#[case::小数の割引率("HALF", 12.5, 175.0)]
#[case::小数表記の整数割引率("SEVENTY", 70.0, 60.0)]
#[tokio::test]
async fn test_小数を含む割引率で作成して適用できる(
   #[case] code: &str,
   #[case] discount: f64,
   #[case] expected_final: f64,
) {
   let repo = MockVoucherRepository::new();
   let sut = create_test_app(&repo);

   let (status, _) = send(
      &sut,
      post_json("/vouchers", &json!({ "code": code, "discount": discount })),
   )
   .await;
   assert_eq!(status, StatusCode::CREATED);

   let inserted = repo.inserted();
   assert_eq!(inserted.len(), 1);
   assert_eq!(inserted[0].discount().as_percent(), discount);

   let (status, body) = send_json(
      &sut,
      post_json("/vouchers/apply", &json!({ "code": code, "amount": 200 })),
   )
   .await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      body["data"],
      json!({
         "amount": 200.0,
         "discount": discount,
         "finalAmount": expected_final,
         "applied": true
      })
   );
}

#[rstest]
#[case::空のコード(json!({ "code": "", "discount": 10 }))]
#[case::空白のみのコード(json!({ "code": "   ", "discount": 10 }))]
#[case::割引率が100超(json!({ "code": "MOCKCODE", "discount": 101 }))]
#[case::割引率が負(json!({ "code": "MOCKCODE", "discount": -1 }))]
#[case::割引率が100をわずかに超える(json!({ "code": "MOCKCODE", "discount": 100.5 }))]
#[tokio::test]
async fn test_不正な作成リクエストは400を返す(#[case] request: JsonValue) {
   let repo = MockVoucherRepository::new();
   let sut = create_test_app(&repo);

   let (status, body) = send_json(&sut, post_json("/vouchers", &request)).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      body["type"],
      "https://promoflow.example.com/errors/validation-error"
   );
   assert!(repo.inserted().is_empty());
}

#[tokio::test]
async fn test_ストア障害は500を返す() {
   let sut = create_test_app(&MockVoucherRepository::failing("ストア停止中"));

   let (status, body) = send_json(
      &sut,
      post_json(
         "/vouchers/apply",
         &json!({ "code": "MOCKCODE", "amount": 1000 }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   assert_eq!(body["status"], 500);
   assert_eq!(body["detail"], "内部エラーが発生しました");
}
