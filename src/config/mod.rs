use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use crate::error::{EnrichError, EnrichResult};

/// 默认规则集镜像
pub const DEFAULT_MIRROR_URL: &str = "https://raw.gitmirror.com";
/// 默认测速地址
pub const DEFAULT_HEALTH_CHECK_URL: &str = "https://www.gstatic.com/generate_204";

/// 生成器配置，默认值即脚本内置常量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // 规则集
    pub mirror_url: String,
    pub provider_interval: u64,
    pub ruleset_dir: String,

    // 测速参数
    pub health_check_url: String,
    pub health_check_interval: u64,
    pub max_failed_times: u32,
    pub tolerance: u32,

    // 日志配置
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirror_url: DEFAULT_MIRROR_URL.to_string(),
            provider_interval: 86400,
            ruleset_dir: "./ruleset".to_string(),
            health_check_url: DEFAULT_HEALTH_CHECK_URL.to_string(),
            health_check_interval: 300,
            max_failed_times: 3,
            tolerance: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EnrichResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> EnrichResult {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 检查镜像与测速地址可解析、各间隔非零
    pub fn validate(&self) -> EnrichResult {
        for (field, value) in [
            ("mirror_url", &self.mirror_url),
            ("health_check_url", &self.health_check_url),
        ] {
            Url::parse(value)
                .map_err(|e| EnrichError::InvalidSettings(format!("{field} = {value}: {e}")))?;
        }

        if self.provider_interval == 0 {
            return Err(EnrichError::InvalidSettings(
                "provider_interval 不能为 0".to_string(),
            ));
        }
        if self.health_check_interval == 0 {
            return Err(EnrichError::InvalidSettings(
                "health_check_interval 不能为 0".to_string(),
            ));
        }

        Ok(())
    }

    /// 去掉末尾 `/` 的镜像地址，便于拼接
    pub fn mirror_base(&self) -> &str {
        self.mirror_url.trim_end_matches('/')
    }

    pub fn ruleset_base(&self) -> &str {
        self.ruleset_dir.trim_end_matches('/')
    }
}
