use crate::types::Submission;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON shape of the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestShape {
    /// The source text as a bare JSON string
    #[default]
    Bare,
    /// `{"code": <source>, "tab_size": <n>}`
    Wrapped,
}

pub fn request_body(submission: &Submission, shape: RequestShape) -> Value {
    match shape {
        RequestShape::Bare => Value::String(submission.source.clone()),
        RequestShape::Wrapped => serde_json::json!({
            "code": submission.source,
            "tab_size": submission.tab_size,
        }),
    }
}
