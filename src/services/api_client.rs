use http::StatusCode;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{AppError, Result},
};

/// Thin wrapper over the commerce REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        self.send(self.request(Method::GET, path, token)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q, token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path, token).query(query))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path, token).json(body))
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path, token).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        self.send(self.request(Method::DELETE, path, token)).await
    }

    /// Reachability probe used by the readiness check.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .request(Method::GET, "/health", None)
            .send()
            .await?;

        if response.status().is_server_error() {
            return Err(AppError::Upstream {
                status: response.status(),
                message: "Commerce API is unhealthy".to_string(),
            });
        }

        Ok(())
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;
        let body = parse_body(&bytes, status, &url);

        if !status.is_success() {
            tracing::warn!("Commerce API {} responded {}", url, status);
            return Err(error_for_status(status, &body));
        }

        serde_json::from_value(unwrap_envelope(body)).map_err(|e| {
            AppError::InternalError(format!("Unexpected response from {}: {}", url, e))
        })
    }
}

/// Validates a caller-supplied id or slug before it is spliced into an
/// upstream path. Anything that could escape its segment is refused.
pub fn path_segment(raw: &str) -> Result<&str> {
    let segment = raw.trim();
    let valid = !segment.is_empty()
        && segment.len() <= 128
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        return Err(AppError::BadRequest(format!("Invalid identifier: {}", raw)));
    }

    Ok(segment)
}

/// 204 and empty bodies decode as JSON null.
fn parse_body(bytes: &[u8], status: StatusCode, url: &str) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    match serde_json::from_slice(bytes) {
        Ok(body) => body,
        Err(e) => {
            if status.is_success() {
                tracing::warn!("Commerce API {} returned {} with a non-JSON body: {}", url, status, e);
            }
            Value::Null
        }
    }
}

/// Responses arrive either bare or wrapped as `{ "data": ... }`.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut obj) if obj.contains_key("data") => {
            obj.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn error_for_status(status: StatusCode, body: &Value) -> AppError {
    let message = body
        .get("message")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(
            message.unwrap_or_else(|| "Please sign in again".to_string()),
        ),
        StatusCode::NOT_FOUND => {
            AppError::NotFound(message.unwrap_or_else(|| "Not found".to_string()))
        }
        _ => AppError::Upstream {
            status,
            message: message.unwrap_or_else(|| "Request failed".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_is_unwrapped() {
        assert_eq!(unwrap_envelope(json!({ "data": [1, 2] })), json!([1, 2]));
        assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({ "addresses": [] })),
            json!({ "addresses": [] })
        );
    }

    #[test]
    fn path_segment_refuses_traversal() {
        assert_eq!(path_segment("64f1c2ab9e").unwrap(), "64f1c2ab9e");
        assert_eq!(path_segment("linen-shirt_02").unwrap(), "linen-shirt_02");

        for raw in ["../../orders/42", "a/b", "..", "a\\b", "a?b=1", "a%2Fb", "", "   "] {
            assert!(
                matches!(path_segment(raw), Err(AppError::BadRequest(_))),
                "{}",
                raw
            );
        }
    }

    #[test]
    fn non_json_bodies_fall_back_to_null() {
        assert_eq!(parse_body(b"", StatusCode::NO_CONTENT, "/x"), Value::Null);
        assert_eq!(parse_body(b"<html>ok</html>", StatusCode::OK, "/x"), Value::Null);
        assert_eq!(parse_body(br#"{"a":1}"#, StatusCode::OK, "/x"), json!({ "a": 1 }));
    }

    #[test]
    fn status_mapping_uses_upstream_message() {
        let err = error_for_status(StatusCode::UNAUTHORIZED, &json!({ "message": "Token expired" }));
        assert!(matches!(err, AppError::Unauthorized(ref m) if m == "Token expired"));

        let err = error_for_status(StatusCode::NOT_FOUND, &Value::Null);
        assert!(matches!(err, AppError::NotFound(_)));

        let err = error_for_status(StatusCode::UNPROCESSABLE_ENTITY, &json!({ "error": "Invalid OTP" }));
        assert!(matches!(
            err,
            AppError::Upstream { status: StatusCode::UNPROCESSABLE_ENTITY, ref message } if message == "Invalid OTP"
        ));
    }
}
