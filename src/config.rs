use anyhow::bail;

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub lifetime_ms: i64,
}

#[derive(Debug, Clone)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub token: TokenConfig,
    pub hasher: HasherConfig,
    pub cv_upload_dir: String,
    pub cors_allowed_origins: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let secret = std::env::var("TOKEN_SECRET")?;
        if secret.len() < 32 {
            bail!("TOKEN_SECRET must be at least 32 bytes");
        }
        let token = TokenConfig {
            secret,
            lifetime_ms: std::env::var("TOKEN_LIFETIME_MS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(86_400_000),
        };

        let hasher = HasherConfig {
            memory_kib: std::env::var("ARGON2_MEMORY_KIB")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(19_456),
            iterations: std::env::var("ARGON2_ITERATIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(2),
        };

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:4200".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url,
            token,
            hasher,
            cv_upload_dir: std::env::var("CV_UPLOAD_DIR").unwrap_or_else(|_| "uploads/cvs".into()),
            cors_allowed_origins,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
        })
    }
}
