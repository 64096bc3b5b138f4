// config.rs
use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Runtime configuration, built once in `main` and passed down explicitly.
/// Secrets never have source-embedded defaults; the database fallback is a
/// credential-free local instance.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: env::var("PORT")
                .ok()
                .map(|p| p.parse().expect("PORT must be a number"))
                .unwrap_or(DEFAULT_PORT),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so all cases run in one test.
    #[test]
    fn from_env_reads_overrides_and_falls_back() {
        env::remove_var("DATABASE_URL");
        env::remove_var("PORT");
        env::remove_var("UPLOAD_DIR");

        let config = AppConfig::from_env();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));

        env::set_var("DATABASE_URL", "mongodb://db.example:27017/posts");
        env::set_var("PORT", "8080");
        env::set_var("UPLOAD_DIR", "/tmp/post-images");

        let config = AppConfig::from_env();
        assert_eq!(config.database_url, "mongodb://db.example:27017/posts");
        assert_eq!(config.port, 8080);
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/post-images"));

        env::remove_var("DATABASE_URL");
        env::remove_var("PORT");
        env::remove_var("UPLOAD_DIR");
    }
}
