use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShortlifeError};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，进程生命周期内只读）
///
/// - server: HTTP 监听地址、端口、worker 数量
/// - link: 短链生成与默认限制
/// - app: 后台清理任务
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub link: LinkConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从默认路径和环境变量加载配置，失败时回退到默认值
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：SL，分隔符：__
    /// 示例：SL__LINK__CODE_LENGTH=8
    pub fn load() -> Self {
        match Self::build(DEFAULT_CONFIG_PATH, false) {
            Ok(config) => {
                if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", DEFAULT_CONFIG_PATH);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// 从指定文件加载配置（文件必须存在）
    pub fn load_from(path: &str) -> Result<Self> {
        Self::build(path, true)
    }

    fn build(path: &str, required: bool) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("SL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// 校验配置，拒绝会让核心逻辑无法工作的取值
    pub fn validate(&self) -> Result<()> {
        if self.link.base_url.trim().is_empty() {
            return Err(ShortlifeError::config("link.base_url must not be empty"));
        }
        if self.link.code_length == 0 {
            return Err(ShortlifeError::config("link.code_length must be positive"));
        }
        if self.link.max_short_gen_attempts == 0 {
            return Err(ShortlifeError::config(
                "link.max_short_gen_attempts must be positive",
            ));
        }
        if self.app.cleanup_interval_seconds == 0 {
            return Err(ShortlifeError::config(
                "app.cleanup_interval_seconds must be positive",
            ));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 短链配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkConfig {
    /// Prefix of every short URL handed back to callers
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
    #[serde(default = "default_max_clicks")]
    pub default_max_clicks: u32,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Candidate codes tried before create gives up
    #[serde(default = "default_max_short_gen_attempts")]
    pub max_short_gen_attempts: u32,
}

/// 后台任务配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_ttl_seconds() -> u64 {
    86400
}

fn default_max_clicks() -> u32 {
    100
}

fn default_code_length() -> usize {
    6
}

fn default_max_short_gen_attempts() -> u32 {
    10
}

fn default_cleanup_interval_seconds() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_ttl_seconds: default_ttl_seconds(),
            default_max_clicks: default_max_clicks(),
            code_length: default_code_length(),
            max_short_gen_attempts: default_max_short_gen_attempts(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StaticConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.link.code_length, 6);
        assert_eq!(config.link.max_short_gen_attempts, 10);
        assert_eq!(config.app.cleanup_interval_seconds, 60);
    }

    #[test]
    fn test_validate_rejects_zero_code_length() {
        let mut config = StaticConfig::default();
        config.link.code_length = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ShortlifeError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = StaticConfig::default();
        config.app.cleanup_interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_config_is_parseable() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[link]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.link, LinkConfig::default());
    }
}
