use console_core::client::EntityClient;
use console_core::config::{ConsoleConfig, EndpointsConfig};
use console_core::roles::RolesClient;
use contracts::shared::schema::EntitySchema;
use leptos::prelude::*;

use crate::shared::api_utils::api_base;
use crate::shared::http::GlooTransport;

/// Application-wide services: the loaded configuration and the transport
/// every client is built on. Provided once at the root.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    config: StoredValue<ConsoleConfig>,
    transport: StoredValue<GlooTransport>,
}

impl AppGlobalContext {
    pub fn new(config: ConsoleConfig) -> Self {
        let base = api_base(&config.api);
        log::info!("Console API base: {}", base);
        Self {
            transport: StoredValue::new(GlooTransport::new(base)),
            config: StoredValue::new(config),
        }
    }

    /// Entity client at the endpoint `pick` selects from the configuration
    pub fn entity_client<S: EntitySchema>(
        &self,
        pick: fn(&EndpointsConfig) -> &str,
    ) -> EntityClient<S, GlooTransport> {
        let transport = self.transport.get_value();
        self.config
            .with_value(|c| EntityClient::new(transport, &c.api, Some(pick(&c.endpoints))))
    }

    pub fn roles_client(&self) -> RolesClient<GlooTransport> {
        let transport = self.transport.get_value();
        self.config.with_value(|c| RolesClient::new(transport, c))
    }
}

pub fn use_app_context() -> AppGlobalContext {
    expect_context::<AppGlobalContext>()
}
