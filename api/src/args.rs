use std::{path::PathBuf, time::Duration};

use clap::{Args as ClapArgs, Parser};
use dawa_core::domain::common::{DawaConfig, LLMConfig, ScratchConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "dawa-api", version, about = "Medicine recognition and safety backend")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:8000"
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum size of an analysis request body
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 20 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(
        long,
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: String,

    /// Upper bound for one round trip to the vision model
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub llm_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StorageArgs {
    /// Directory holding index.html, manifest.json, sw.js and other assets
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Directory for per-request scratch copies of uploads
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Used when RUST_LOG is not set
    #[arg(long, env = "LOG_FILTER", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

impl From<Args> for DawaConfig {
    fn from(args: Args) -> Self {
        DawaConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                timeout: Duration::from_secs(args.llm.llm_timeout_secs),
            },
            scratch: ScratchConfig {
                upload_dir: args.storage.upload_dir,
            },
        }
    }
}
