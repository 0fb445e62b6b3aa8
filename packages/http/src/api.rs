use std::fmt;
use std::sync::Arc;

use crudux_token_store::{InMemoryTokenStore, SharedTokenStore};

use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};

/// Entry point: a validated configuration plus the transport and token store
/// shared by every endpoint created from it.
///
/// # Example
///
/// ```ignore
/// use crudux_http::{Api, ApiConfig};
///
/// let api = Api::new(ApiConfig::new("https://api.example.com"))?;
/// let companies = api.endpoint("companies");
///
/// let mut notifications = Vec::new();
/// companies.read(None, &mut notifications)?;
/// ```
#[derive(Clone)]
pub struct Api {
    config: ApiConfig,
    executor: Arc<dyn HttpExecutor>,
    tokens: SharedTokenStore,
}

impl Api {
    /// Create an API using a reqwest client and an in-memory token store.
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        Self::with_token_store(config, Arc::new(InMemoryTokenStore::new()))
    }

    /// Create an API using a reqwest client and the given token store.
    pub fn with_token_store(config: ApiConfig, tokens: SharedTokenStore) -> Result<Self, Error> {
        config.validate()?;
        let executor = ReqwestExecutor::new(config.timeout())?;
        Self::with_parts(config, Arc::new(executor), tokens)
    }

    /// Create an API with both dependencies injected.
    pub fn with_parts(
        config: ApiConfig,
        executor: Arc<dyn HttpExecutor>,
        tokens: SharedTokenStore,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            executor,
            tokens,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn token_store(&self) -> &SharedTokenStore {
        &self.tokens
    }

    /// Describe the resource `resource_name` of this API.
    pub fn endpoint(&self, resource_name: impl Into<String>) -> Endpoint {
        Endpoint::new(
            resource_name.into(),
            &self.config,
            self.executor.clone(),
            self.tokens.clone(),
        )
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
