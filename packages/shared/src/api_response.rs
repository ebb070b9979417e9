//! # API レスポンスエンベロープ
//!
//! 成功レスポンスの統一形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 成功レスポンスの統一型
///
/// 値を返すエンドポイントは `{ "data": T }` 形式でレスポンスを返す。
/// エラー時のボディはこの型を使わない（[`crate::ErrorResponse`] などを参照）。
///
/// ## 使用例
///
/// ```
/// use promoflow_shared::ApiResponse;
///
/// let response = ApiResponse::new(300.0);
/// assert_eq!(response.data, 300.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
   pub data: T,
}

impl<T> ApiResponse<T> {
   /// 新しい `ApiResponse` を作成する
   pub fn new(data: T) -> Self {
      Self { data }
   }
}
