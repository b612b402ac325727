use std::path::Path;

use crate::config::StaticConfig;
use crate::errors::{Result, ShortlifeError};

/// Default output path for `config generate`
pub const SAMPLE_CONFIG_PATH: &str = "config.example.toml";

/// 生成示例配置文件，已存在时需要 force
pub fn generate_config(output_path: Option<&str>, force: bool) -> Result<String> {
    let path = output_path.unwrap_or(SAMPLE_CONFIG_PATH);

    if Path::new(path).exists() && !force {
        return Err(ShortlifeError::config(format!(
            "{} already exists, pass --force to overwrite",
            path
        )));
    }

    StaticConfig::default().save_to_file(path)?;
    Ok(path.to_string())
}
