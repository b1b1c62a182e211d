use super::request::{RequestShape, request_body};
use super::response::decode_response;
use crate::config::EndpointConfig;
use crate::error::FetchError;
use crate::types::{Submission, ViolationList};
use reqwest::header::CONTENT_TYPE;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// Longest error body kept in a status error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// A service that checks one submission and returns its violations
pub trait CheckService: Send + Sync + 'static {
    fn check(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<ViolationList, FetchError>> + Send;
}

/// Checking service reached over HTTP
pub struct HttpCheckService {
    client: reqwest::Client,
    url: String,
    shape: RequestShape,
    timeout_secs: u64,
}

impl HttpCheckService {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if endpoint.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(endpoint.timeout_secs));
        }
        let client = builder.build().map_err(FetchError::Network)?;

        Ok(Self {
            client,
            url: endpoint.url.clone(),
            shape: endpoint.request_shape,
            timeout_secs: endpoint.timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            FetchError::Network(err)
        }
    }
}

impl CheckService for HttpCheckService {
    async fn check(&self, submission: &Submission) -> Result<ViolationList, FetchError> {
        let body = request_body(submission, self.shape);
        debug!(
            "Submission {}: POST {} ({} bytes of source)",
            submission.id,
            self.url,
            submission.source.len()
        );

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        trace!("Submission {}: response body: {}", submission.id, text);

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: snippet(&text),
            });
        }

        let violations = decode_response(&text)?;
        debug!(
            "Submission {}: {} violations",
            submission.id,
            violations.len()
        );
        Ok(violations)
    }
}

fn snippet(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_ERROR_BODY_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/code", addr)
    }

    fn service(url: String, shape: RequestShape, timeout_secs: u64) -> HttpCheckService {
        HttpCheckService::new(&EndpointConfig {
            url,
            request_shape: shape,
            timeout_secs,
        })
        .unwrap()
    }

    fn submission(source: &str) -> Submission {
        Submission {
            id: 7,
            source: source.to_string(),
            tab_size: 3,
        }
    }

    #[tokio::test]
    async fn test_posts_source_and_decodes_records() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let router = Router::new().route(
            "/code",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(json!([
                        ["[FORBIDDEN] Break", 4, 1, "Break is forbidden", "      break;\n"]
                    ]))
                }
            }),
        );
        let url = serve(router).await;

        let list = service(url, RequestShape::Bare, 5)
            .check(&submission("while (true) {\n    break;\n}\n"))
            .await
            .unwrap();

        assert_eq!(list.len(), 1);
        assert!(list[0].is_forbidden());
        assert_eq!(list[0].line_number, 4);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![json!("while (true) {\n    break;\n}\n")]
        );
    }

    #[tokio::test]
    async fn test_wrapped_request_shape() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let router = Router::new().route(
            "/code",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(json!({"result": []}))
                }
            }),
        );
        let url = serve(router).await;

        let list = service(url, RequestShape::Wrapped, 5)
            .check(&submission(""))
            .await
            .unwrap();

        assert!(list.is_empty());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![json!({"code": "", "tab_size": 3})]
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let router = Router::new().route(
            "/code",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Traceback: boom") }),
        );
        let url = serve(router).await;

        let err = service(url, RequestShape::Bare, 5)
            .check(&submission("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Status);
        assert_eq!(err.to_string(), "Checking service returned 500: Traceback: boom");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new().route("/code", post(|| async { "No code" }));
        let url = serve(router).await;

        let err = service(url, RequestShape::Bare, 5)
            .check(&submission("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/code",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!([]))
            }),
        );
        let url = serve(router).await;

        let err = service(url, RequestShape::Bare, 1)
            .check(&submission("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Timeout);
        assert_eq!(err.to_string(), "Checking service did not answer within 1s");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(format!("http://{}/code", addr), RequestShape::Bare, 5)
            .check(&submission("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        assert_eq!(snippet("  short \n"), "short");
        let long = "a".repeat(500);
        let cut = snippet(&long);
        assert_eq!(cut.len(), MAX_ERROR_BODY_CHARS + 3);
        assert!(cut.ends_with("..."));
    }
}
