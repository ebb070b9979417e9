//! # テストユーティリティ
//!
//! トレーシングのスパン・イベントをキャプチャする Layer。

use std::sync::{Arc, Mutex};

use tracing::{
   Event,
   Subscriber,
   field::{Field, Visit},
   span::{Attributes, Id},
   subscriber::DefaultGuard,
};
use tracing_subscriber::{Layer, layer::Context, prelude::*};

/// キャプチャしたスパンまたはイベント
#[derive(Debug, Clone)]
pub(crate) struct Captured {
   pub name:   String,
   pub fields: Vec<(String, String)>,
}

impl Captured {
   /// フィールド値を取得する（記録されていなければ `None`）
   pub fn field(&self, name: &str) -> Option<&str> {
      self
         .fields
         .iter()
         .find(|(k, _)| k == name)
         .map(|(_, v)| v.as_str())
   }
}

/// キャプチャ結果
#[derive(Clone, Default)]
pub(crate) struct CapturedLog {
   spans:  Arc<Mutex<Vec<Captured>>>,
   events: Arc<Mutex<Vec<Captured>>>,
}

impl CapturedLog {
   pub fn spans(&self) -> Vec<Captured> {
      self.spans.lock().unwrap().clone()
   }

   pub fn events(&self) -> Vec<Captured> {
      self.events.lock().unwrap().clone()
   }
}

struct CaptureLayer {
   log: CapturedLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
   fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
      let mut visitor = FieldVisitor::default();
      attrs.record(&mut visitor);
      self.log.spans.lock().unwrap().push(Captured {
         name:   attrs.metadata().name().to_string(),
         fields: visitor.fields,
      });
   }

   fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
      let mut visitor = FieldVisitor::default();
      event.record(&mut visitor);
      self.log.events.lock().unwrap().push(Captured {
         name:   event.metadata().level().to_string(),
         fields: visitor.fields,
      });
   }
}

#[derive(Default)]
struct FieldVisitor {
   fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
   fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
      self
         .fields
         .push((field.name().to_string(), format!("{value:?}")));
   }

   fn record_str(&mut self, field: &Field, value: &str) {
      self.fields.push((field.name().to_string(), value.to_string()));
   }
}

/// キャプチャ subscriber をセットアップする
///
/// 返り値の `DefaultGuard` はスコープに保持すること（ドロップでリセット）。
pub(crate) fn setup_capture() -> (DefaultGuard, CapturedLog) {
   let log = CapturedLog::default();
   let subscriber = tracing_subscriber::registry().with(CaptureLayer { log: log.clone() });
   let guard = tracing::subscriber::set_default(subscriber);
   (guard, log)
}
