//! 策略组布局：节点选择 -> 自动选择 -> 漏网之鱼 -> 业务组 -> 地区负载 -> 其他地区

use super::region::{OTHER_REGION, Region, other_region_filter};
use super::types::{BalanceStrategy, DIRECT, GroupType, ProxyGroup};
use crate::config::Settings;

pub const NODE_SELECT: &str = "🚀 节点选择";
pub const AUTO_GROUP: &str = "♻️ 自动选择";
pub const FALLBACK_GROUP: &str = "🐟 漏网之鱼";

pub const AI_GROUP: &str = "🤖 AI服务";
pub const GOOGLE_GROUP: &str = "🔍 Google";
pub const MICROSOFT_GROUP: &str = "🪟 Microsoft";
pub const SCHOLAR_GROUP: &str = "学术网站";
pub const YOUTUBE_GROUP: &str = "YouTube";
pub const TIKTOK_GROUP: &str = "TikTok";
pub const NETFLIX_GROUP: &str = "Netflix";
pub const X_GROUP: &str = "X";
pub const TELEGRAM_GROUP: &str = "Telegram";

/// 业务组，声明顺序即输出顺序
pub const SERVICE_GROUPS: [&str; 9] = [
    AI_GROUP,
    GOOGLE_GROUP,
    MICROSOFT_GROUP,
    SCHOLAR_GROUP,
    YOUTUBE_GROUP,
    TIKTOK_GROUP,
    NETFLIX_GROUP,
    X_GROUP,
    TELEGRAM_GROUP,
];

fn region_group_names() -> impl Iterator<Item = &'static str> {
    Region::ALL.into_iter().map(|region| region.group_name())
}

/// 业务组候选：节点选择 -> 直连 -> 常用地区 -> 其他地区
pub fn service_candidates() -> Vec<&'static str> {
    let mut candidates = vec![NODE_SELECT, DIRECT];
    candidates.extend(region_group_names());
    candidates.push(OTHER_REGION);
    candidates
}

fn node_select_group() -> ProxyGroup {
    let mut members = vec![AUTO_GROUP];
    members.extend(region_group_names());
    members.extend([OTHER_REGION, DIRECT]);

    ProxyGroup::new(NODE_SELECT, GroupType::Select)
        .with_proxies(members)
        .include_all_proxies()
}

fn auto_group(settings: &Settings) -> ProxyGroup {
    ProxyGroup::new(AUTO_GROUP, GroupType::UrlTest)
        .with_health_check(&settings.health_check_url, settings.health_check_interval)
        .with_tolerance(settings.tolerance)
        .lazy()
        .include_all_proxies()
}

fn fallback_group() -> ProxyGroup {
    let mut members = vec![DIRECT, NODE_SELECT, AUTO_GROUP];
    members.extend(region_group_names());
    members.push(OTHER_REGION);

    ProxyGroup::new(FALLBACK_GROUP, GroupType::Select)
        .with_proxies(members)
        .include_all_proxies()
}

fn service_group(name: &str) -> ProxyGroup {
    let group = ProxyGroup::new(name, GroupType::Select).with_proxies(service_candidates());
    // AI 组额外允许直接挑单个节点
    if name == AI_GROUP {
        group.include_all_proxies()
    } else {
        group
    }
}

/// 地区负载组：一致性哈希 + 懒测速，成员由内核按 filter 从全部节点中筛选
pub fn region_group(region: Region, settings: &Settings) -> ProxyGroup {
    ProxyGroup::new(region.group_name(), GroupType::LoadBalance)
        .with_strategy(BalanceStrategy::ConsistentHashing)
        .with_health_check(&settings.health_check_url, settings.health_check_interval)
        .with_max_failed_times(settings.max_failed_times)
        .lazy()
        .include_all_proxies()
        .with_filter(region.filter())
}

/// 其他地区：手动选择，不测速
pub fn other_region_group() -> ProxyGroup {
    ProxyGroup::new(OTHER_REGION, GroupType::Select)
        .include_all_proxies()
        .with_filter(other_region_filter())
}

/// 生成完整的 proxy-groups 列表
pub fn build_proxy_groups(settings: &Settings) -> Vec<ProxyGroup> {
    let mut groups = vec![node_select_group(), auto_group(settings), fallback_group()];
    groups.extend(SERVICE_GROUPS.into_iter().map(service_group));
    groups.extend(
        Region::ALL
            .into_iter()
            .map(|region| region_group(region, settings)),
    );
    groups.push(other_region_group());
    groups
}
