//! LLM error types.

use thiserror::Error;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed (connect error, timeout, aborted body)
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not the JSON shape the provider documents
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint could not be turned into a request URL
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// Turn a non-success response into `LLMError::Api`, otherwise parse the body.
pub(crate) async fn read_json<T>(response: reqwest::Response) -> Result<T, LLMError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(LLMError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
