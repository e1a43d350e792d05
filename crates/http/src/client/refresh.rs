//! Refresh cycle and session-expiry fallback

use tracing::{debug, warn};
use volant_core::CredentialPair;

use super::VolantClient;
use super::error::ClientError;
use crate::types::{ApiEnvelope, RefreshRequest, SessionTokens};

impl VolantClient {
    /// Exchange the stored refresh token for a fresh access token.
    ///
    /// Attempts are serialized behind the refresh gate; a caller whose failed
    /// token no longer matches the stored pair takes the already-rotated
    /// token without another network call. The refresh POST goes straight to
    /// the transport, never through [`VolantClient::send`], and is never
    /// retried.
    pub(crate) async fn refresh_access(
        &self,
        used_access: Option<&str>,
    ) -> Result<String, ClientError> {
        let _gate = self.refresh_gate.lock().await;

        // Another request may have rotated the pair while we waited.
        let current = self.store.get().await?;
        if let Some(pair) = &current {
            if Some(pair.access_token.as_str()) != used_access {
                debug!("credential pair already rotated, skipping refresh call");
                return Ok(pair.access_token.clone());
            }
        }

        let refresh_token = current.and_then(|pair| pair.refresh_token).ok_or_else(|| {
            ClientError::AuthenticationFailed("no refresh token stored".to_string())
        })?;

        let url = format!("{}{}", self.base_url, self.refresh_path);
        let response = self
            .http
            .post(url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }

        let envelope: ApiEnvelope<SessionTokens> =
            response.json().await.map_err(ClientError::from_reqwest)?;
        let tokens = envelope.into_data()?;

        self.store
            .set(CredentialPair::new(
                tokens.access_token.clone(),
                tokens.refresh_token,
            ))
            .await?;
        debug!("rotated credential pair");

        Ok(tokens.access_token)
    }

    /// Tear down the session after an unrecoverable 401: clear the stored
    /// pair and send the host to the login page unless it is already there.
    pub(crate) async fn expire_session(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear credentials while expiring session");
        }

        if self.navigator.current_path() != self.login_path {
            self.navigator.navigate_to(&self.login_path);
        }
    }
}
