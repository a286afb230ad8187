use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::errors::AppError;

/// Environment variable that supplies the chat-completion credential.
pub const CREDENTIAL_ENV_VAR: &str = "GITHUB_TOKEN";

/// Hard-configured base URL for the OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://models.inference.ai.azure.com";

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Number of documents requested per similarity search.
pub const DEFAULT_TOP_K: usize = 2;

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    /// Data lives under a fixed relative path next to the binary's working dir.
    pub fn new() -> Self {
        Self::under(PathBuf::from("data"))
    }

    pub fn under(data_dir: PathBuf) -> Self {
        let log_dir = data_dir.join("logs");
        let db_path = data_dir.join("travel_rag.db");

        for dir in [&data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            data_dir,
            log_dir,
            db_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub top_k: usize,
}

impl AppConfig {
    /// Reads the credential from the environment; everything else is fixed.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(CREDENTIAL_ENV_VAR)
            .map_err(|_| AppError::MissingCredential(CREDENTIAL_ENV_VAR))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
        })
    }
}
