use std::path::PathBuf;

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
    /// Directory where attachment bytes are stored and served from.
    pub upload_dir: PathBuf,
    /// Which scoring oracle the workflow uses.
    pub scoring: ScoringConfig,
}

/// Scoring oracle selection.
#[derive(Debug, Clone)]
pub enum ScoringConfig {
    /// Deterministic local scorer; the default when no assistant endpoint
    /// is configured.
    Heuristic,
    /// Generative assistant reached over HTTP.
    Http { url: String, timeout_secs: u64 },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `storage/uploads`          |
    /// | `SCORING_ORACLE`       | `heuristic`                |
    /// | `SCORING_URL`          | (required when `http`)     |
    /// | `SCORING_TIMEOUT_SECS` | `20`                       |
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

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "storage/uploads".into()),
        );

        let scoring = match std::env::var("SCORING_ORACLE")
            .unwrap_or_else(|_| "heuristic".into())
            .as_str()
        {
            "heuristic" => ScoringConfig::Heuristic,
            "http" => {
                let url = std::env::var("SCORING_URL")
                    .expect("SCORING_URL must be set when SCORING_ORACLE=http");
                let timeout_secs: u64 = std::env::var("SCORING_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "20".into())
                    .parse()
                    .expect("SCORING_TIMEOUT_SECS must be a valid u64");
                ScoringConfig::Http { url, timeout_secs }
            }
            other => panic!("Unknown SCORING_ORACLE '{other}' (expected heuristic|http)"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            scoring,
        }
    }
}
