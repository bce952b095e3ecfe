//! 错误类型定义

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("读取文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML 解析失败: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// 策略组成员或规则目标引用了不存在的策略组
    #[error("{owner} 引用了不存在的策略组: {target}")]
    DanglingReference { owner: String, target: String },

    #[error("生成器配置无效: {0}")]
    InvalidSettings(String),
}

pub type EnrichResult<T = ()> = Result<T, EnrichError>;
