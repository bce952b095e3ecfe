//! Clash 策略组、规则集与规则的结构体定义

use serde::Serialize;
use std::fmt;

/// 内置策略，不需要对应的策略组
pub const DIRECT: &str = "DIRECT";
pub const REJECT: &str = "REJECT";

pub fn is_builtin_policy(name: &str) -> bool {
    matches!(name, DIRECT | REJECT)
}

/// 策略组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupType {
    Select,
    UrlTest,
    LoadBalance,
}

/// 负载均衡策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStrategy {
    ConsistentHashing,
}

/// 策略组，字段顺序即输出顺序
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<BalanceStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_failed_times: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_proxies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ProxyGroup {
    /// 创建空策略组
    pub fn new(name: impl Into<String>, group_type: GroupType) -> Self {
        Self {
            name: name.into(),
            group_type,
            strategy: None,
            proxies: None,
            url: None,
            interval: None,
            tolerance: None,
            max_failed_times: None,
            lazy: None,
            include_all_proxies: None,
            filter: None,
        }
    }

    /// 设置固定成员
    pub fn with_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = Some(proxies.into_iter().map(Into::into).collect());
        self
    }

    /// 设置测速参数
    pub fn with_health_check(mut self, url: &str, interval: u64) -> Self {
        self.url = Some(url.to_string());
        self.interval = Some(interval);
        self
    }

    pub fn with_strategy(mut self, strategy: BalanceStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_max_failed_times(mut self, times: u32) -> Self {
        self.max_failed_times = Some(times);
        self
    }

    /// 只在被使用时测速
    pub fn lazy(mut self) -> Self {
        self.lazy = Some(true);
        self
    }

    /// 引入全部节点，可配合 filter 过滤
    pub fn include_all_proxies(mut self) -> Self {
        self.include_all_proxies = Some(true);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// 固定成员列表，未设置时为空
    pub fn members(&self) -> &[String] {
        self.proxies.as_deref().unwrap_or_default()
    }
}

/// 远程规则集
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: String,
    pub interval: u64,
    pub path: String,
    pub url: String,
}

/// 规则匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatcher {
    RuleSet,
    GeoIp,
    DomainSuffix,
    DomainKeyword,
    ProcessName,
    Match,
}

impl RuleMatcher {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleMatcher::RuleSet => "RULE-SET",
            RuleMatcher::GeoIp => "GEOIP",
            RuleMatcher::DomainSuffix => "DOMAIN-SUFFIX",
            RuleMatcher::DomainKeyword => "DOMAIN-KEYWORD",
            RuleMatcher::ProcessName => "PROCESS-NAME",
            RuleMatcher::Match => "MATCH",
        }
    }
}

/// 单条分流规则，按声明顺序首条命中生效
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub matcher: RuleMatcher,
    pub value: Option<String>,
    pub target: String,
}

impl Rule {
    pub fn new(matcher: RuleMatcher, value: &str, target: &str) -> Self {
        Self {
            matcher,
            value: Some(value.to_string()),
            target: target.to_string(),
        }
    }

    /// 兜底规则 `MATCH,<target>`
    pub fn fallback(target: &str) -> Self {
        Self {
            matcher: RuleMatcher::Match,
            value: None,
            target: target.to_string(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{},{},{}", self.matcher.as_str(), value, self.target),
            None => write!(f, "{},{}", self.matcher.as_str(), self.target),
        }
    }
}
