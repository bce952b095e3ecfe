//! 地区分类
//! 按节点名称中的地区关键词（中文名、英文缩写、主要城市）划分地区

use lazy_static::lazy_static;
use regex::Regex;

/// 其他地区组名
pub const OTHER_REGION: &str = "🌐 其他地区";

/// 其他国家关键词，按国家分组
const OTHER_REGION_KEYWORDS: [&str; 27] = [
    "韩国|韓國|korea|kr|seoul|首尔|釜山",
    "英国|uk|london",
    "德国|germany|deutsch|berlin",
    "法国|france|paris",
    "加拿大|canada|toronto|vancouver",
    "澳大利亚|澳洲|australia|sydney|melbourne",
    "俄罗斯|俄罗?斯|russia|moscow",
    "土耳其|turkey|turkiye|istanbul",
    "印度|india|mumbai|new ?delhi|bangalore",
    "荷兰|netherlands|amsterdam",
    "意大利|italy|rome|milan",
    "西班牙|spain|madrid|barcelona",
    "巴西|brazil|sao ?paulo",
    "阿根廷|argentina|buenos ?aires",
    "墨西哥|mexico|mexico ?city",
    "波兰|poland|warsaw",
    "瑞士|swiss|switzerland|zurich",
    "瑞典|sweden|stockholm",
    "挪威|norway|oslo",
    "丹麦|denmark|copenhagen",
    "芬兰|finland|helsinki",
    "越南|vietnam|hanoi|saigon|ho ?chi ?minh",
    "泰国|thailand|bangkok",
    "马来西亚|malaysia|kuala ?lumpur",
    "菲律宾|philippines|manila",
    "印尼|indonesia|jakarta",
    "新西兰|new ?zealand|auckland",
];

/// 常用地区（港台日新美），声明顺序即输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    HongKong,
    Taiwan,
    Japan,
    Singapore,
    UnitedStates,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::HongKong,
        Region::Taiwan,
        Region::Japan,
        Region::Singapore,
        Region::UnitedStates,
    ];

    /// 地区负载组名
    pub fn group_name(&self) -> &'static str {
        match self {
            Region::HongKong => "🇭🇰 香港负载",
            Region::Taiwan => "🇹🇼 台湾负载",
            Region::Japan => "🇯🇵 日本负载",
            Region::Singapore => "🇸🇬 狮城负载",
            Region::UnitedStates => "🇺🇸 美国负载",
        }
    }

    /// 交给内核的 filter 正则
    pub fn filter(&self) -> &'static str {
        match self {
            Region::HongKong => "(?i)香港|hong ?kong|hk",
            Region::Taiwan => "(?i)台湾|台灣|新北|彰化|taiwan|tw|taipei",
            Region::Japan => "(?i)日本|japan|jp|tokyo|osaka|saitama",
            Region::Singapore => "(?i)新加坡|singapore|sg|狮城",
            Region::UnitedStates => {
                "(?i)美国|united ?states|usa|america|洛杉矶|芝加哥|纽约|seattle|silicon ?valley"
            }
        }
    }

    fn index(&self) -> usize {
        match self {
            Region::HongKong => 0,
            Region::Taiwan => 1,
            Region::Japan => 2,
            Region::Singapore => 3,
            Region::UnitedStates => 4,
        }
    }

    /// 节点名称是否命中本地区
    pub fn matches(&self, name: &str) -> bool {
        REGION_PATTERNS[self.index()].is_match(name)
    }
}

/// 其他地区的 filter 正则
pub fn other_region_filter() -> String {
    format!("(?i){}", OTHER_REGION_KEYWORDS.join("|"))
}

lazy_static! {
    static ref REGION_PATTERNS: Vec<Regex> = Region::ALL
        .iter()
        .map(|region| Regex::new(region.filter()).expect("内置地区正则无效"))
        .collect();
    static ref OTHER_REGION_PATTERN: Regex =
        Regex::new(&other_region_filter()).expect("内置地区正则无效");
}

/// 返回节点命中的全部常用地区；地区之间不互斥
pub fn classify(name: &str) -> Vec<Region> {
    Region::ALL
        .into_iter()
        .filter(|region| region.matches(name))
        .collect()
}

pub fn matches_other_region(name: &str) -> bool {
    OTHER_REGION_PATTERN.is_match(name)
}

/// 各常用地区命中的节点数，按 `Region::ALL` 顺序
pub fn region_counts(names: &[&str]) -> Vec<(Region, usize)> {
    Region::ALL
        .into_iter()
        .map(|region| {
            let count = names.iter().filter(|name| region.matches(name)).count();
            (region, count)
        })
        .collect()
}

/// 既不属于常用地区、也不属于其他地区的节点，只能在节点选择中手动选择
pub fn unclassified<'a>(names: &[&'a str]) -> Vec<&'a str> {
    names
        .iter()
        .copied()
        .filter(|name| classify(name).is_empty() && !matches_other_region(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_filters_compile() {
        for region in Region::ALL {
            assert!(Regex::new(region.filter()).is_ok(), "{}", region.group_name());
        }
        assert!(Regex::new(&other_region_filter()).is_ok());
    }

    #[test]
    fn test_hong_kong_case_insensitive() {
        assert_eq!(classify("HK-01"), vec![Region::HongKong]);
        assert_eq!(classify("hk-02"), vec![Region::HongKong]);
        assert_eq!(classify("Hong Kong IPLC"), vec![Region::HongKong]);
        assert_eq!(classify("🇭🇰 香港 03"), vec![Region::HongKong]);
    }

    #[test]
    fn test_region_keywords() {
        assert_eq!(classify("台灣 新北 01"), vec![Region::Taiwan]);
        assert_eq!(classify("Japan Osaka"), vec![Region::Japan]);
        assert_eq!(classify("新加坡 02"), vec![Region::Singapore]);
        assert_eq!(classify("US Seattle 01"), vec![Region::UnitedStates]);
        assert_eq!(classify("美国 洛杉矶"), vec![Region::UnitedStates]);
    }

    #[test]
    fn test_unmatched_node() {
        assert!(classify("random-node").is_empty());
        assert!(!matches_other_region("random-node"));
    }

    #[test]
    fn test_regions_may_overlap() {
        assert_eq!(
            classify("HK-JP relay"),
            vec![Region::HongKong, Region::Japan]
        );
    }

    #[test]
    fn test_other_region() {
        assert!(matches_other_region("🇰🇷 Seoul 01"));
        assert!(matches_other_region("德国 法兰克福"));
        assert!(matches_other_region("New Zealand"));
        assert!(matches_other_region("俄斯 测试"));
        assert!(classify("London 01").is_empty());
        assert!(other_region_filter().starts_with("(?i)韩国|"));
    }

    #[test]
    fn test_unclassified_nodes() {
        let names = ["HK-01", "Korea Seoul", "random-node", "美国 洛杉矶", "local-test"];
        assert_eq!(unclassified(&names), vec!["random-node", "local-test"]);
        assert!(unclassified(&[]).is_empty());
    }

    #[test]
    fn test_region_counts() {
        let names = ["HK-01", "hk-02", "HK-JP relay", "Tokyo 01", "random-node"];
        let counts = region_counts(&names);
        assert_eq!(
            counts,
            vec![
                (Region::HongKong, 3),
                (Region::Taiwan, 0),
                (Region::Japan, 2),
                (Region::Singapore, 0),
                (Region::UnitedStates, 0),
            ]
        );
    }
}
