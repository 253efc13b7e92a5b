use crate::auth::JwtConfig;
use crate::payment::RazorpayConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/slice | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (generated in dev) | Token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
/// | RAZORPAY_KEY_ID | "" | Gateway API key id |
/// | RAZORPAY_KEY_SECRET | "" | Gateway API secret (also signs payments) |
/// | RAZORPAY_BASE_URL | https://api.razorpay.com | Gateway endpoint |
/// | ADMIN_EMAIL | admin@slice.local | Bootstrap admin account email |
/// | ADMIN_PASSWORD | (seed skipped) | Bootstrap admin password, first boot only |
/// | LOG_LEVEL | info | Tracing level |
/// | LOG_DIR | (stdout only) | Daily-rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database files
    pub work_dir: String,
    /// HTTP API listen port
    pub http_port: u16,
    /// JWT authentication configuration
    pub jwt: JwtConfig,
    /// Payment gateway credentials
    pub razorpay: RazorpayConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/slice".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            razorpay: RazorpayConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Path of the embedded database directory
    pub fn database_path(&self) -> String {
        format!("{}/database", self.work_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
