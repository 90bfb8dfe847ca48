//! Authenticated client for the upstream registry service.

use reqwest::header::USER_AGENT;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::config::UpstreamConfig;
use crate::error::TricountError;
use crate::session::{Session, SessionAuth};

pub const REGISTRATION_PATH: &str = "/v1/session-registry-installation";

#[derive(Debug, Clone)]
pub struct TricountClient {
    config: UpstreamConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct RegistrationRequest {
    app_installation_uuid: String,
    client_public_key: String,
    device_description: String,
}

impl TricountClient {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Registers the session's installation with the upstream service and
    /// returns a new session carrying the bearer token and account id. The
    /// `Response` array is scanned for its `Token` and `UserPerson` elements;
    /// their order is not guaranteed by the service.
    pub async fn authenticate(&self, session: Session) -> Result<Session, TricountError> {
        let payload = RegistrationRequest {
            app_installation_uuid: session.installation_id().to_string(),
            client_public_key: session.public_key_pem().to_string(),
            device_description: self.config.device_description.clone(),
        };

        let response = self
            .request(self.http.post(self.config.endpoint(REGISTRATION_PATH)), &session)
            .json(&payload)
            .send()
            .await
            .map_err(|error| TricountError::Transport(error.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| TricountError::Transport(error.to_string()))?;
        if !status.is_success() {
            return Err(TricountError::Auth(body_text(&bytes)));
        }

        let body: Value = serde_json::from_slice(&bytes).map_err(|error| {
            TricountError::Auth(format!("registration response is not json: {error}"))
        })?;
        let auth = session_auth_from_registration(&body)
            .ok_or_else(|| TricountError::Auth("token or user id not found".to_string()))?;

        debug!(
            installation_id = %session.installation_id(),
            user_id = %auth.user_id,
            "registered installation with upstream"
        );
        Ok(session.with_auth(auth))
    }

    /// Fetches one registry's raw representation by its public identifier
    /// token. Returns the body as unvalidated JSON; normalization is a
    /// separate step so malformed payloads are diagnosed independently of
    /// network failures.
    pub async fn fetch_registry(
        &self,
        session: &Session,
        public_token: &str,
    ) -> Result<Value, TricountError> {
        let auth = session.auth().ok_or(TricountError::NotAuthenticated)?;

        let path = format!("/v1/user/{}/registry", auth.user_id);
        let response = self
            .request(self.http.get(self.config.endpoint(&path)), session)
            .query(&[("public_identifier_token", public_token)])
            .header("X-Bunq-Client-Authentication", &auth.token)
            .send()
            .await
            .map_err(|error| TricountError::Transport(error.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| TricountError::Transport(error.to_string()))?;
        if !status.is_success() {
            return Err(TricountError::Fetch {
                status,
                body: body_text(&bytes),
            });
        }

        debug!(user_id = %auth.user_id, "fetched registry payload");
        serde_json::from_slice(&bytes).map_err(|error| {
            TricountError::structural(format!("registry response is not json: {error}"))
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        builder
            .header(USER_AGENT, &self.config.user_agent)
            .header("app-id", session.installation_id().to_string())
            .header("X-Bunq-Client-Request-Id", Uuid::new_v4().to_string())
    }
}

fn session_auth_from_registration(body: &Value) -> Option<SessionAuth> {
    let items = body.get("Response")?.as_array()?;
    let token = items
        .iter()
        .find_map(|item| item.get("Token")?.get("token")?.as_str())?
        .to_string();
    let user_id = items
        .iter()
        .find_map(|item| id_as_string(item.get("UserPerson")?.get("id")?))?;
    Some(SessionAuth { token, user_id })
}

// The account id is only ever interpolated into a URL path; upstream has
// emitted it as both a number and a string.
fn id_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn body_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() {
        "<empty>".to_string()
    } else {
        text
    }
}
