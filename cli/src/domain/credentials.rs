//! Credentials supplied to the setup phase.

/// Identity and secrets for one publish job. Never persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialBundle {
    pub email: String,
    pub username: String,
    /// SSH private key with push access; `None` skips all git setup.
    pub deploy_key: Option<String>,
    /// npm config text merged into the project config; `None` skips the merge.
    pub npm_config: Option<String>,
}

impl CredentialBundle {
    /// Build a bundle, treating empty secret strings as absent.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        deploy_key: Option<String>,
        npm_config: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            deploy_key: deploy_key.filter(|k| !k.is_empty()),
            npm_config: npm_config.filter(|t| !t.trim().is_empty()),
        }
    }
}

// Manual impl so secrets never reach logs through `{:?}`.
impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("deploy_key", &self.deploy_key.as_ref().map(|_| "<redacted>"))
            .field("npm_config", &self.npm_config.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
