//! Authentication API client methods

use reqwest::Method;
use volant_core::CredentialPair;

use super::VolantClient;
use super::error::ClientError;
use crate::types::{AdminProfile, LoginRequest, LoginSession};

impl VolantClient {
    /// Sign in and persist the returned token pair
    pub async fn login(&self, request: &LoginRequest) -> Result<AdminProfile, ClientError> {
        let req = self.request(Method::POST, "/auth/login").json(request)?;
        let session: LoginSession = self.execute_data(req).await?;

        self.store
            .set(CredentialPair::new(
                session.tokens.access_token,
                session.tokens.refresh_token,
            ))
            .await?;

        Ok(session.admin)
    }

    /// Sign out; the stored pair is discarded whether or not the call succeeds
    pub async fn logout(&self) -> Result<(), ClientError> {
        let req = self.request(Method::POST, "/auth/logout");
        let result = self.execute_unit(req).await;

        self.store.clear().await?;
        result
    }

    /// Profile of the signed-in admin
    pub async fn me(&self) -> Result<AdminProfile, ClientError> {
        let req = self.request(Method::GET, "/auth/me");
        self.execute_data(req).await
    }
}
