//! Shared HTTP response helpers.
//!
//! Centralizes status-code classification so endpoint modules stay focused
//! on request construction and response mapping.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. Otherwise:
/// - **401** → [`ClientError::Unauthorized`]
/// - **404** → [`ClientError::NotFound`]
/// - **other non-success**, including 403 → [`ClientError::Api`]
///
/// The error carries the service's `detail` message when the body has one.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail = extract_detail(&body, status);
    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized {
            status: status.as_u16(),
            detail,
        },
        StatusCode::NOT_FOUND => ClientError::NotFound(detail),
        _ => ClientError::Api {
            status: status.as_u16(),
            detail,
        },
    })
}

/// Decode a successful JSON body.
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// Handles `{"detail": "..."}`, validation lists
/// (`{"detail": [{"msg": "..."}]}`), and plain text.
pub fn extract_detail(body: &str, status: StatusCode) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("detail")? {
            Value::String(detail) => Some(detail.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            other => Some(other.to_string()),
        });
    from_json.unwrap_or_else(|| {
        let text = body.trim();
        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            text.to_string()
        }
    })
}

/// Filename from a `Content-Disposition` header, if it names one.
pub fn content_disposition_filename(resp: &reqwest::Response) -> Option<String> {
    let header = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    parse_disposition_filename(header)
}

fn parse_disposition_filename(header: &str) -> Option<String> {
    let start = header.find("filename=")? + "filename=".len();
    let rest = header[start..].trim_start_matches('"');
    let name: String = rest.chars().take_while(|c| *c != '"' && *c != ';').collect();
    let name = name.trim();
    // A bare path segment only; never let the server pick a directory.
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_download(disposition: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(200)
                .header("Content-Disposition", disposition)
                .body(String::new())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn rejected_token_is_an_auth_failure() {
        let err = check_response(mock_response(401, r#"{"detail": "Could not validate credentials"}"#))
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.detail(), "Could not validate credentials");
    }

    #[tokio::test]
    async fn forbidden_keeps_the_session() {
        let err = check_response(mock_response(403, r#"{"detail": "Admin access required"}"#))
            .await
            .unwrap_err();
        assert!(!err.is_auth_failure());
        assert!(matches!(err, ClientError::Api { status: 403, ref detail } if detail == "Admin access required"));
    }

    #[tokio::test]
    async fn missing_report_is_not_found() {
        let err = check_response(mock_response(404, r#"{"detail": "No issues file found"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref d) if d == "No issues file found"));
        assert!(!err.is_auth_failure());
    }

    #[tokio::test]
    async fn server_error_keeps_plain_body() {
        let err = check_response(mock_response(500, "Internal Server Error"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, ref detail } if detail == "Internal Server Error"));
    }

    #[test]
    fn validation_errors_are_joined() {
        let body = r#"{"detail": [{"loc": ["body", "file"], "msg": "field required"}, {"msg": "bad type"}]}"#;
        assert_eq!(
            extract_detail(body, StatusCode::UNPROCESSABLE_ENTITY),
            "field required; bad type"
        );
    }

    #[test]
    fn empty_body_uses_reason_phrase() {
        assert_eq!(extract_detail("", StatusCode::BAD_GATEWAY), "Bad Gateway");
    }

    #[rstest]
    #[case(r#"attachment; filename="issues_2025.xlsx""#, Some("issues_2025.xlsx"))]
    #[case("attachment; filename=summary.json", Some("summary.json"))]
    #[case(r#"attachment; filename="../../etc/passwd""#, Some("passwd"))]
    #[case("attachment", None)]
    #[case(r#"attachment; filename="""#, None)]
    fn disposition_filenames(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            content_disposition_filename(&mock_download(header)).as_deref(),
            expected
        );
    }

    #[tokio::test]
    async fn decode_reports_parse_errors() {
        let err = decode::<serde_json::Value>(mock_response(200, "not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
