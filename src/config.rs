use serde::Deserialize;

pub const DEFAULT_SOLLIT_API_URL: &str = "https://app.sollit.com/api/person";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Bearer credential for the Sollit API. Optional so the service can boot
    /// (and answer health checks) without it; the lead route reports a config
    /// error per request until it is set.
    pub sollit_api_key: Option<String>,
    pub sollit_api_url: String,
    /// Strict mode: reject leads missing postcode, number, first_name or
    /// last_name instead of defaulting them to empty strings.
    pub require_contact_fields: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            sollit_api_key: std::env::var("SOLLIT_API_KEY")
                .or_else(|_| std::env::var("sollit_api_key"))
                .ok()
                .filter(|key| !key.trim().is_empty()),
            sollit_api_url: std::env::var("SOLLIT_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("SOLLIT_API_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_SOLLIT_API_URL.to_string()),
            require_contact_fields: std::env::var("REQUIRE_CONTACT_FIELDS")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        if config.sollit_api_key.is_none() {
            tracing::warn!("SOLLIT_API_KEY not set - lead submissions will fail until configured");
        }

        tracing::debug!("Sollit API URL: {}", config.sollit_api_url);
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!(
            "Required-field enforcement: {}",
            if config.require_contact_fields {
                "strict"
            } else {
                "lenient"
            }
        );

        Ok(config)
    }
}
