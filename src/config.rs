use clap::{Args, Parser};
use std::fmt;
use std::path::PathBuf;

use crate::processing::ocr::DEFAULT_LANGUAGE;

/// Connection settings for the `id_card_data` store.
///
/// Every option can come from the environment; unset values fall back to the
/// local development database.
#[derive(Args, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database server host
    #[arg(long = "db-host", env = "IDCARD_DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database server port
    #[arg(long = "db-port", env = "IDCARD_DB_PORT", default_value_t = 5432)]
    pub port: u16,

    /// Database user
    #[arg(long = "db-user", env = "IDCARD_DB_USER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(long = "db-password", env = "IDCARD_DB_PASSWORD", default_value = "1234!", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long = "db-name", env = "IDCARD_DB_NAME", default_value = "ocr_data")]
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "1234!".to_string(),
            database: "ocr_data".to_string(),
        }
    }
}

// Keep the password out of logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl fmt::Display for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

/// Extract fields from PAN and Aadhaar card images.
///
/// Reads one image path per line from stdin and writes one JSON result per
/// image to stdout. Image paths given as arguments are processed instead.
#[derive(Parser, Debug)]
#[command(name = "idcard-ocr", version, about, long_about = None)]
pub struct ServiceConfig {
    /// Images to process instead of reading paths from stdin
    pub images: Vec<PathBuf>,

    /// Tesseract data directory
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata: Option<String>,

    /// OCR language
    #[arg(long, env = "IDCARD_OCR_LANG", default_value = DEFAULT_LANGUAGE)]
    pub lang: String,

    /// Binarize images (Otsu threshold) before OCR
    #[arg(long)]
    pub binarize: bool,

    /// Do not store results in the database
    #[arg(long)]
    pub no_persist: bool,

    /// Create the id_card_data table if it does not exist
    #[arg(long, conflicts_with = "no_persist")]
    pub init_schema: bool,

    /// One JSON object per line instead of pretty output
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub database: DatabaseConfig,
}
