/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP backend binds to
    pub bind_addr: String,
    /// Directory holding the question-bank flat files
    pub data_dir: String,
    /// Directory used by the file-backed key-value store
    pub storage_dir: String,
    /// Base URL the question-bank loader fetches from
    pub backend_base_url: String,
    /// Whether per-question search decisions get verbose logs
    pub verbose_logging: bool,
    // --- LLM configuration ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            data_dir: "data".to_string(),
            storage_dir: "storage".to_string(),
            backend_base_url: "http://127.0.0.1:3000".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let default = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(default.data_dir),
            storage_dir: std::env::var("STORAGE_DIR").unwrap_or(default.storage_dir),
            backend_base_url: std::env::var("BACKEND_BASE_URL").unwrap_or(default.backend_base_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
