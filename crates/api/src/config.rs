use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Whether the session cookie carries the `Secure` attribute
    /// (default: `false`; enable behind HTTPS).
    pub cookie_secure: bool,
    /// When `true`, registrations are verified immediately and unverified
    /// logins verify the account in place (local development mode).
    pub auth_auto_verify: bool,
    /// Public base URL of the frontend, used to build links in emails
    /// (default: `http://localhost:3000`).
    pub app_url: String,
    /// Super-admin account seeded at startup. Seeding is skipped unless
    /// both email and password are present.
    pub super_admin_email: Option<String>,
    /// Plaintext password for the seeded super-admin account.
    pub super_admin_password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `COOKIE_SECURE`        | `false`                    |
    /// | `AUTH_AUTO_VERIFY`     | `false`                    |
    /// | `APP_URL`              | `http://localhost:3000`    |
    /// | `SUPER_ADMIN_EMAIL`    | unset (no seeding)         |
    /// | `SUPER_ADMIN_PASSWORD` | unset (no seeding)         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cookie_secure = env_flag("COOKIE_SECURE");
        let auth_auto_verify = env_flag("AUTH_AUTO_VERIFY");

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let super_admin_email = std::env::var("SUPER_ADMIN_EMAIL").ok().filter(|s| !s.is_empty());
        let super_admin_password = std::env::var("SUPER_ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            cookie_secure,
            auth_auto_verify,
            app_url,
            super_admin_email,
            super_admin_password,
        }
    }
}

/// Parse a boolean environment flag. Accepts `1`, `true`, `yes` (any case).
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "1" || v == "true" || v == "yes"
        })
        .unwrap_or(false)
}
