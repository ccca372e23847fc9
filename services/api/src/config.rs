use serde::Deserialize;

use storefront_core::config::Config;

/// Storefront API configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server. Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// `sandbox` or `production`.
    #[serde(default)]
    pub braintree_environment: BraintreeEnvironment,
    pub braintree_merchant_id: String,
    pub braintree_public_key: String,
    pub braintree_private_key: String,
}

fn default_api_port() -> u16 {
    8080
}

impl Config for ApiConfig {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BraintreeEnvironment {
    #[default]
    Sandbox,
    Production,
}
