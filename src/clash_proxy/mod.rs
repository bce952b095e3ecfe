//! Clash 配置增强模块封装
//! 对外提供地区分类、策略组、规则集与分流规则的生成接口

// 导入子模块
pub mod groups;
mod manager;
pub mod providers;
pub mod region;
pub mod rules;
mod types;

// 对外暴露公共类型和结构体
pub use manager::{
    ConfigEnricher, PROXY_GROUPS_KEY, RULE_PROVIDERS_KEY, RULES_KEY, enrich, enrich_with,
    verify_references,
};
pub use region::{
    OTHER_REGION, Region, classify, matches_other_region, region_counts, unclassified,
};
pub use types::{
    BalanceStrategy, DIRECT, GroupType, ProxyGroup, REJECT, Rule, RuleMatcher, RuleProvider,
    is_builtin_policy,
};
