/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development
/// except the webhook secrets, which default to empty and therefore
/// reject every delivery until configured.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared secret for Shopify webhook HMAC verification.
    pub shopify_webhook_secret: String,
    /// Shared secret for WooCommerce webhook HMAC verification.
    pub woocommerce_webhook_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SHOPIFY_WEBHOOK_SECRET`     | (empty — rejects all)   |
    /// | `WOOCOMMERCE_WEBHOOK_SECRET` | (empty — rejects all)   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shopify_webhook_secret =
            std::env::var("SHOPIFY_WEBHOOK_SECRET").unwrap_or_default();
        let woocommerce_webhook_secret =
            std::env::var("WOOCOMMERCE_WEBHOOK_SECRET").unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shopify_webhook_secret,
            woocommerce_webhook_secret,
        }
    }
}
