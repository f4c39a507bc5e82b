//! Shared HTTP response checks for the remote client.

use crate::error::Error;

/// Check an HTTP response for common error conditions.
///
/// - **429 Too Many Requests** -> [`Error::RateLimited`], honouring
///   `Retry-After` (60 s when absent or unparseable).
/// - **Non-success status** -> [`Error::Api`] with the response body.
pub(crate) async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    if resp.status() == 429 {
        return Err(Error::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(Error::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, retry_after: Option<&str>) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body("forbidden").unwrap())
    }

    #[test]
    fn parse_retry_after_from_header() {
        assert_eq!(parse_retry_after(&mock_response(429, Some("120"))), 120);
    }

    #[test]
    fn parse_retry_after_falls_back() {
        assert_eq!(parse_retry_after(&mock_response(429, None)), 60);
        assert_eq!(parse_retry_after(&mock_response(429, Some("soon"))), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited() {
        let err = check_response(mock_response(429, Some("30"))).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn check_response_api_error_carries_body() {
        let err = check_response(mock_response(403, None)).await.unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, None)).await.is_ok());
    }
}
