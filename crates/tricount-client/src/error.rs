use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TricountError {
    #[error("key provisioning failed: {0}")]
    Provision(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not authenticated: authenticate() must succeed before fetching")]
    NotAuthenticated,
    #[error("registry fetch failed ({status}): {body}")]
    Fetch { status: StatusCode, body: String },
    #[error("malformed registry payload: {0}")]
    Structural(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl TricountError {
    pub(crate) fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }
}
