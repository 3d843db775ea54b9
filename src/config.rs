use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub environment: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let database_url = std::env::var("DATABASE_URL")?;
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig {
            access_secret: std::env::var("ACCESS_TOKEN_SECRET")?,
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET")?,
            access_ttl_minutes: std::env::var("ACCESS_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
            refresh_ttl_days: std::env::var("REFRESH_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        Ok(Self {
            port,
            database_url,
            environment,
            jwt,
        })
    }

    /// Cookies carry `Secure` everywhere except local development.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
