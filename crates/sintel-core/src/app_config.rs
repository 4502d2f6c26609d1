use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub news_api_key: String,
    pub data_dir: PathBuf,
    pub triggers_path: PathBuf,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("news_api_key", &"[redacted]")
            .field("data_dir", &self.data_dir)
            .field("triggers_path", &self.triggers_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
