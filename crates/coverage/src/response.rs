use foundation::CaptureDate;

const STATUS_BODY_PREFIX_CHARS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// The request never produced a response (network, CORS, aborted).
    Transport(String),
    /// The endpoint answered with a non-2xx status.
    Status { status: u16, body: String },
    /// The body was not a JSON array of `YYYY-MM-DD` strings.
    Decode(String),
}

impl CoverageError {
    pub fn status(status: u16, body: &str) -> Self {
        CoverageError::Status {
            status,
            body: body.trim().chars().take(STATUS_BODY_PREFIX_CHARS).collect(),
        }
    }
}

impl std::fmt::Display for CoverageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageError::Transport(msg) => write!(f, "coverage request failed: {msg}"),
            CoverageError::Status { status, body } if body.is_empty() => {
                write!(f, "unexpected coverage status {status}")
            }
            CoverageError::Status { status, body } => {
                write!(f, "unexpected coverage status {status}: {body}")
            }
            CoverageError::Decode(msg) => write!(f, "malformed coverage response: {msg}"),
        }
    }
}

impl std::error::Error for CoverageError {}

/// Decodes a coverage body: a JSON array of dates, newest first.
pub fn decode_dates(body: &str) -> Result<Vec<CaptureDate>, CoverageError> {
    serde_json::from_str(body).map_err(|e| CoverageError::Decode(e.to_string()))
}
