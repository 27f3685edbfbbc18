//! GitHub App client construction.
//!
//! The App-level client authenticates with a JWT signed by the App's RSA
//! private key; per-delivery clients are derived from it for the installation
//! named in the webhook payload, which scopes every REST call to the
//! repositories that installation can see.

use jsonwebtoken::EncodingKey;
use octocrab::models::{AppId, InstallationId};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::host::GithubHost;

/// Failure to construct an authenticated client.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The configured private key is not a valid RSA PEM.
    #[error("invalid GitHub App private key: {0}")]
    InvalidPrivateKey(#[from] jsonwebtoken::errors::Error),

    /// The underlying client could not be built or scoped.
    #[error("failed to construct GitHub client: {0}")]
    Client(#[from] octocrab::Error),
}

/// The process-wide GitHub App identity.
#[derive(Clone)]
pub struct GithubApp {
    client: Octocrab,
}

impl GithubApp {
    /// Builds the App-level client from the App id and its RSA private key.
    pub fn new(app_id: u64, private_key: &SecretString) -> Result<Self, CredentialsError> {
        let key = EncodingKey::from_rsa_pem(private_key.expose_secret().as_bytes())?;
        let client = Octocrab::builder().app(AppId(app_id), key).build()?;
        Ok(Self { client })
    }

    /// Returns a [`GithubHost`] scoped to the given installation.
    pub fn installation_host(&self, installation_id: u64) -> Result<GithubHost, CredentialsError> {
        let client = self.client.installation(InstallationId(installation_id))?;
        Ok(GithubHost::new(client))
    }
}
