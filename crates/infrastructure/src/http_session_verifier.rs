//! Session verification against the external auth service.

use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use eventdesk_application::{AUTHENTICATION_FAILED_SIGNAL, SessionVerifier};
use eventdesk_core::{ActorIdentity, ActorRole, AppError, AppResult};

const VERIFY_PATH: &str = "api/auth/verify";

/// Verifies bearer tokens with `GET {base}/api/auth/verify`.
#[derive(Clone)]
pub struct HttpSessionVerifier {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl HttpSessionVerifier {
    /// Creates a verifier for the auth service rooted at `base_url`.
    pub fn new(http_client: reqwest::Client, base_url: &Url) -> AppResult<Self> {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(path.as_str());
        }

        let endpoint = base_url.join(VERIFY_PATH).map_err(|error| {
            AppError::Internal(format!("invalid auth service URL '{base_url}': {error}"))
        })?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// Returns the verification endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifiedSessionResponse {
    subject: String,
    display_name: String,
    #[serde(default)]
    email: Option<String>,
    role: ActorRole,
    #[serde(default)]
    permissions: Vec<String>,
    is_active: bool,
}

impl From<VerifiedSessionResponse> for ActorIdentity {
    fn from(value: VerifiedSessionResponse) -> Self {
        Self::new(
            value.subject,
            value.display_name,
            value.email,
            value.role,
            value.permissions,
            value.is_active,
        )
    }
}

fn rejection_error(status: StatusCode, body: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(format!(
            "{AUTHENTICATION_FAILED_SIGNAL}: auth service returned status {}",
            status.as_u16()
        )),
        _ => AppError::Internal(format!(
            "auth service returned status {}: {body}",
            status.as_u16()
        )),
    }
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self, token: &str) -> AppResult<ActorIdentity> {
        let response = self
            .http_client
            .get(self.endpoint.clone())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|error| {
                warn!(error = %error, endpoint = %self.endpoint, "auth service unreachable");
                AppError::Internal(format!("failed to call auth service: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(rejection_error(status, body.as_str()));
        }

        let payload = response
            .json::<VerifiedSessionResponse>()
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to parse auth service response body: {error}"
                ))
            })?;

        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use url::Url;

    use eventdesk_core::{ActorIdentity, ActorRole, AppError};

    use super::{HttpSessionVerifier, VerifiedSessionResponse, rejection_error};

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://auth.eventdesk.test/identity");
        let Ok(base) = base else {
            panic!("test URL should parse");
        };

        let verifier = HttpSessionVerifier::new(reqwest::Client::new(), &base);

        assert_eq!(
            verifier.map(|verifier| verifier.endpoint().as_str().to_owned()).ok(),
            Some("https://auth.eventdesk.test/identity/api/auth/verify".to_owned())
        );
    }

    #[test]
    fn rejected_tokens_are_authentication_failures() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let error = rejection_error(status, "");
            assert!(matches!(error, AppError::Unauthorized(message) if message.contains("Authentication failed")));
        }
    }

    #[test]
    fn other_statuses_are_internal() {
        let error = rejection_error(StatusCode::BAD_GATEWAY, "upstream down");

        assert!(matches!(error, AppError::Internal(message) if message.contains("upstream down")));
    }

    #[test]
    fn payload_maps_to_actor() {
        let payload = serde_json::from_str::<VerifiedSessionResponse>(
            r#"{
                "subject": "u-1",
                "displayName": "Ann",
                "role": "SUB_ADMIN",
                "permissions": ["events-all"],
                "isActive": true
            }"#,
        );
        let Ok(payload) = payload else {
            panic!("payload should deserialize");
        };

        let actor = ActorIdentity::from(payload);
        assert_eq!(actor.role(), ActorRole::SubAdmin);
        assert!(actor.holds("events-all"));
        assert_eq!(actor.email(), None);
    }
}
