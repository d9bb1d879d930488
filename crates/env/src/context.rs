//! Per-invocation context shared by every stage

use gsmenv_config::Config;
use gsmenv_core::Environment;
use gsmenv_secrets::SecretStoreClient;

/// Everything a launch needs: the immutable configuration and the client
/// built from it at startup
#[derive(Clone, Copy)]
pub struct LaunchContext<'a> {
    config: &'a Config,
    client: &'a dyn SecretStoreClient,
}

impl<'a> LaunchContext<'a> {
    pub fn new(config: &'a Config, client: &'a dyn SecretStoreClient) -> Self {
        Self { config, client }
    }

    /// Ambient project for partial secret paths
    pub fn project(&self) -> Option<&'a str> {
        self.config.project()
    }

    /// Environment captured at startup
    pub fn environment(&self) -> &'a Environment {
        self.config.environment()
    }

    pub fn client(&self) -> &'a dyn SecretStoreClient {
        self.client
    }
}
