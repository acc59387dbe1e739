use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Absolute backend URL. When absent the frontend derives it from the
    /// window location and `port`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Query parameter used for the active-only listing filter
    #[serde(default = "default_active_filter_param")]
    pub active_filter_param: String,
    /// Fail list requests on an unrecognized envelope instead of returning
    /// an empty collection. Meant for development builds.
    #[serde(default)]
    pub strict_envelopes: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EndpointsConfig {
    pub categories: String,
    pub products: String,
    pub purchases: String,
    pub sales: String,
    pub roles: String,
    pub users: String,
    pub permissions: String,
    pub role_permissions: String,
}

fn default_port() -> u16 {
    3000
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_active_filter_param() -> String {
    "activo".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api"
active_filter_param = "activo"
strict_envelopes = false

[endpoints]
categories = "categorias"
products = "productos"
purchases = "compras"
sales = "ventas"
roles = "roles"
users = "usuarios"
permissions = "permisos"
role_permissions = "permisosrol"
"#;

/// Load configuration.
///
/// `overrides` is a TOML document supplied by the host page; when absent or
/// blank the embedded default is used.
pub fn load_config(overrides: Option<&str>) -> anyhow::Result<ConsoleConfig> {
    if let Some(text) = overrides.filter(|t| !t.trim().is_empty()) {
        log::info!("Loading console config from host overrides");
        let config: ConsoleConfig = toml::from_str(text)?;
        return Ok(config);
    }

    log::debug!("Using default embedded configuration");
    let config: ConsoleConfig = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl ApiConfig {
    /// Join the API prefix and an endpoint into a request path
    pub fn path(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.prefix.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.base_url, None);
        assert!(!config.api.strict_envelopes);
        assert_eq!(config.endpoints.categories, "categorias");
        assert_eq!(config.endpoints.role_permissions, "permisosrol");
    }

    #[test]
    fn test_overrides_fill_defaults() {
        let text = r#"
            [api]
            base_url = "https://erp.example.com"
            strict_envelopes = true

            [endpoints]
            categories = "categories"
            products = "products"
            purchases = "purchases"
            sales = "sales"
            roles = "roles"
            users = "users"
            permissions = "permissions"
            role_permissions = "role-permissions"
        "#;
        let config = load_config(Some(text)).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://erp.example.com"));
        assert_eq!(config.api.prefix, "/api");
        assert_eq!(config.api.active_filter_param, "activo");
        assert!(config.api.strict_envelopes);
    }

    #[test]
    fn test_blank_overrides_use_default() {
        assert_eq!(load_config(Some("  ")).unwrap(), load_config(None).unwrap());
    }

    #[test]
    fn test_invalid_overrides_fail() {
        assert!(load_config(Some("[api]\nport = \"x\"")).is_err());
    }

    #[test]
    fn test_path_join() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.path("categorias"), "/api/categorias");
        assert_eq!(config.api.path("/roles"), "/api/roles");
    }
}
