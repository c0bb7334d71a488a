//! Application context - dependency injection container

use std::sync::Arc;

use convene_common::auth::CredentialStore;
use convene_core::SchedulingService;
use convene_domain::{Config, ConveneError, Result, User};
use convene_infra::{
    build_credential_store, ApiClient, ApiError, AuthApi, RemoteMeetingRepository, UsersApi,
};
use tracing::debug;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthApi,
    pub users: UsersApi,
    pub scheduling: SchedulingService,
}

impl AppContext {
    /// Wire the context with the credential store selected by `config`.
    ///
    /// # Errors
    /// Returns `ConveneError::Config` if the API client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let store = build_credential_store(&config.session);
        Self::with_store(config, store)
    }

    /// Wire the context over an explicit credential store.
    ///
    /// # Errors
    /// Returns `ConveneError::Config` if the API client cannot be built.
    pub fn with_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let api = ApiClient::from_config(&config, store)?;
        let repository = Arc::new(RemoteMeetingRepository::new(api.clone()));

        Ok(Self {
            auth: AuthApi::new(api.clone()),
            users: UsersApi::new(api.clone()),
            scheduling: SchedulingService::new(repository),
            api,
            config,
        })
    }

    /// Restore a previous session from the credential store.
    ///
    /// Returns `true` if stored credentials were found.
    ///
    /// # Errors
    /// Returns `ConveneError::Storage` if the store cannot be read.
    pub async fn initialize(&self) -> Result<bool> {
        let restored =
            self.api.session().initialize().await.map_err(|e| ConveneError::from(ApiError::from(e)))?;
        debug!(restored, "session initialized");
        Ok(restored)
    }

    /// Profile of the signed-in user; the actor for role-gated operations.
    ///
    /// # Errors
    /// Returns `ConveneError::Authentication` without a usable session.
    pub async fn current_user(&self) -> Result<User> {
        Ok(self.auth.current_user().await?)
    }
}
