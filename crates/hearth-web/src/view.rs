//! The render boundary.
//!
//! Handlers hand a named view a fixed set of named values. Rendering is not
//! done here; the view is serialised as
//! `{"view": "<name>", "values": {...}}` for whatever front end consumes it.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct View {
  name:   &'static str,
  values: Map<String, Value>,
}

impl View {
  pub fn new(name: &'static str) -> Self { Self { name, values: Map::new() } }

  /// Attach a named value. Values that fail to serialise render as `null`.
  pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
    let value = serde_json::to_value(value).unwrap_or_else(|e| {
      warn!(view = self.name, key, error = %e, "view value failed to serialise");
      Value::Null
    });
    self.values.insert(key.to_owned(), value);
    self
  }
}

impl IntoResponse for View {
  fn into_response(self) -> Response {
    Json(json!({ "view": self.name, "values": self.values })).into_response()
  }
}
