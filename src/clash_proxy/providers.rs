//! rule-providers：blackmatrix7/ios_rule_script 规则集，经镜像拉取

use serde_yaml::{Mapping, Value};

use super::types::RuleProvider;
use crate::config::Settings;

const RULE_USER: &str = "blackmatrix7";
const RULE_REPO: &str = "ios_rule_script";

/// (规则集名, 上游目录名)，声明顺序即输出顺序
const PROVIDERS: [(&str, &str); 17] = [
    // AI
    ("OpenAI", "OpenAI"),
    ("Claude", "Claude"),
    ("Gemini", "Gemini"),
    // 常用服务 & 流媒体
    ("Google", "Google"),
    ("Microsoft", "Microsoft"),
    ("GitHub", "GitHub"),
    ("Scholar", "Scholar"),
    ("YouTube", "YouTube"),
    ("TikTok", "TikTok"),
    ("Netflix", "Netflix"),
    ("X", "Twitter"),
    ("Telegram", "Telegram"),
    // 通用分流
    ("Speedtest", "Speedtest"),
    ("Reddit", "Reddit"),
    ("Global", "Global"),
    ("Lan", "Lan"),
    ("China", "China"),
];

/// 上游仓库内的规则文件路径
pub fn upstream_path(dir: &str) -> String {
    format!("rule/Clash/{dir}/{dir}_No_Resolve.yaml")
}

/// 由 (user, repo, path) 构造规则集；本地缓存文件名取 path 的最后一段
pub fn provider(settings: &Settings, user: &str, repo: &str, path: &str) -> RuleProvider {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    RuleProvider {
        provider_type: "http".to_string(),
        behavior: "classical".to_string(),
        interval: settings.provider_interval,
        path: format!("{}/{}", settings.ruleset_base(), file_name),
        url: format!("{}/{}/{}/master/{}", settings.mirror_base(), user, repo, path),
    }
}

/// 全部规则集名
pub fn provider_names() -> impl Iterator<Item = &'static str> {
    PROVIDERS.into_iter().map(|(name, _)| name)
}

pub fn build_rule_providers(settings: &Settings) -> Vec<(&'static str, RuleProvider)> {
    PROVIDERS
        .into_iter()
        .map(|(name, dir)| {
            (
                name,
                provider(settings, RULE_USER, RULE_REPO, &upstream_path(dir)),
            )
        })
        .collect()
}

/// 转为保持插入顺序的 YAML 映射
pub fn providers_to_mapping(
    providers: &[(&'static str, RuleProvider)],
) -> Result<Mapping, serde_yaml::Error> {
    let mut mapping = Mapping::new();
    for (name, provider) in providers {
        mapping.insert(Value::String(name.to_string()), serde_yaml::to_value(provider)?);
    }
    Ok(mapping)
}
