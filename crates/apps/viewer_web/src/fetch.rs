use coverage::{CoverageError, decode_dates};
use foundation::CaptureDate;
use gloo_net::http::Request;

/// GETs the coverage endpoint and decodes its date list.
pub async fn fetch_coverage(url: &str) -> Result<Vec<CaptureDate>, CoverageError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| CoverageError::Transport(e.to_string()))?;
    let body = resp
        .text()
        .await
        .map_err(|e| CoverageError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(CoverageError::status(resp.status(), &body));
    }
    decode_dates(&body)
}
