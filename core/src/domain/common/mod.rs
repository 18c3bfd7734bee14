use std::{path::PathBuf, time::Duration};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct DawaConfig {
    pub llm: LLMConfig,
    pub scratch: ScratchConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct ScratchConfig {
    pub upload_dir: PathBuf,
}
