use serde::Serialize;
use utoipa::ToSchema;

/// Error envelope served with HTTP-success framing; consumers branch on `ok`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
