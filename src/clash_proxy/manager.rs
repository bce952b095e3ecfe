//! 配置增强核心逻辑
//! 在原始配置上生成 proxy-groups / rule-providers / rules，保留原始节点

use log::{debug, info, warn};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

use super::groups::build_proxy_groups;
use super::providers::{build_rule_providers, providers_to_mapping};
use super::rules::build_rules;
use super::types::{ProxyGroup, is_builtin_policy};
use crate::config::Settings;
use crate::error::{EnrichError, EnrichResult};
use crate::proxy::proxy_pool;

pub const PROXY_GROUPS_KEY: &str = "proxy-groups";
pub const RULE_PROVIDERS_KEY: &str = "rule-providers";
pub const RULES_KEY: &str = "rules";

/// 配置增强器
#[derive(Debug, Clone, Default)]
pub struct ConfigEnricher {
    settings: Settings,
}

impl ConfigEnricher {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// 增强配置
    ///
    /// # 参数
    /// - config: 原始配置，`proxies` 为节点列表
    /// - profile_name: 订阅名称，仅用于日志
    ///
    /// # 返回
    /// 节点列表缺失、不是序列或为空时原样返回；否则替换三个字段后返回
    pub fn enrich(&self, config: Value, profile_name: &str) -> Value {
        let node_count = match proxy_pool(&config) {
            Some(list) => list.len(),
            None => {
                warn!("配置 {profile_name:?} 中没有可用节点，跳过处理");
                return config;
            }
        };

        let mut root = match config {
            Value::Mapping(root) => root,
            other => return other,
        };

        debug!("配置 {profile_name:?} 共 {node_count} 个节点");

        let groups = build_proxy_groups(&self.settings);
        let providers = build_rule_providers(&self.settings);
        let rules = build_rules();

        let group_count = groups.len();
        let provider_count = providers.len();
        let rule_count = rules.len();

        // 先全部序列化，失败时整体放弃，避免写出残缺的策略组
        let serialized = groups_to_value(&groups)
            .and_then(|groups| Ok((groups, providers_to_mapping(&providers)?)));
        let (groups, providers) = match serialized {
            Ok(values) => values,
            Err(e) => {
                warn!("配置 {profile_name:?} 序列化失败，保持原样: {e}");
                return Value::Mapping(root);
            }
        };

        set(&mut root, PROXY_GROUPS_KEY, groups);
        set(&mut root, RULE_PROVIDERS_KEY, Value::Mapping(providers));
        set(
            &mut root,
            RULES_KEY,
            Value::Sequence(
                rules
                    .iter()
                    .map(|rule| Value::String(rule.to_string()))
                    .collect(),
            ),
        );

        info!(
            "配置 {profile_name:?} 已生成 {group_count} 个策略组、{provider_count} 个规则集、{rule_count} 条规则"
        );

        Value::Mapping(root)
    }
}

fn set(root: &mut Mapping, key: &str, value: Value) {
    root.insert(Value::String(key.to_string()), value);
}

fn groups_to_value(groups: &[ProxyGroup]) -> Result<Value, serde_yaml::Error> {
    groups
        .iter()
        .map(serde_yaml::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Sequence)
}

/// 使用默认配置增强
pub fn enrich(config: Value, profile_name: &str) -> Value {
    ConfigEnricher::default().enrich(config, profile_name)
}

/// 使用指定配置增强
pub fn enrich_with(config: Value, profile_name: &str, settings: &Settings) -> Value {
    ConfigEnricher::new(settings.clone()).enrich(config, profile_name)
}

/// 检查策略组成员与规则目标均指向已存在的策略组或内置策略
pub fn verify_references(config: &Value) -> EnrichResult {
    let groups = config
        .get(PROXY_GROUPS_KEY)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let names: HashSet<&str> = groups
        .iter()
        .filter_map(|group| group.get("name").and_then(Value::as_str))
        .collect();

    let resolves = |target: &str| names.contains(target) || is_builtin_policy(target);

    for group in groups {
        let owner = group
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let members = group
            .get("proxies")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for member in members.iter().filter_map(Value::as_str) {
            if !resolves(member) {
                return Err(EnrichError::DanglingReference {
                    owner: format!("策略组 {owner}"),
                    target: member.to_string(),
                });
            }
        }
    }

    let rules = config
        .get(RULES_KEY)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for rule in rules.iter().filter_map(Value::as_str) {
        // 目标总是最后一段；忽略 no-resolve 之类的附加参数
        let target = rule
            .split(',')
            .map(str::trim)
            .filter(|part| *part != "no-resolve")
            .last()
            .unwrap_or_default();
        if !resolves(target) {
            return Err(EnrichError::DanglingReference {
                owner: format!("规则 {rule}"),
                target: target.to_string(),
            });
        }
    }

    Ok(())
}
