//! 分流规则，首条命中生效

use super::groups::{
    AI_GROUP, FALLBACK_GROUP, GOOGLE_GROUP, MICROSOFT_GROUP, NETFLIX_GROUP, NODE_SELECT,
    SCHOLAR_GROUP, TELEGRAM_GROUP, TIKTOK_GROUP, X_GROUP, YOUTUBE_GROUP,
};
use super::types::RuleMatcher::{DomainKeyword, DomainSuffix, GeoIp, ProcessName, RuleSet};
use super::types::{DIRECT, Rule};

pub fn build_rules() -> Vec<Rule> {
    vec![
        // 国内直连
        Rule::new(RuleSet, "China", DIRECT),
        Rule::new(RuleSet, "Lan", DIRECT),
        Rule::new(GeoIp, "LAN", DIRECT),
        Rule::new(GeoIp, "CN", DIRECT),
        // AI 优先，Gemini 跟随 Google
        Rule::new(RuleSet, "OpenAI", AI_GROUP),
        Rule::new(RuleSet, "Claude", AI_GROUP),
        Rule::new(RuleSet, "Gemini", GOOGLE_GROUP),
        // Perplexity
        Rule::new(DomainSuffix, "perplexity.ai", AI_GROUP),
        Rule::new(DomainSuffix, "pplx.ai", AI_GROUP),
        // Grok
        Rule::new(ProcessName, "grok", AI_GROUP),
        Rule::new(DomainKeyword, "grok", AI_GROUP),
        Rule::new(DomainSuffix, "x.ai", AI_GROUP),
        Rule::new(DomainSuffix, "grok.com", AI_GROUP),
        // 常用服务
        Rule::new(RuleSet, "Google", GOOGLE_GROUP),
        Rule::new(RuleSet, "GitHub", NODE_SELECT),
        Rule::new(RuleSet, "Scholar", SCHOLAR_GROUP),
        Rule::new(RuleSet, "YouTube", YOUTUBE_GROUP),
        Rule::new(RuleSet, "TikTok", TIKTOK_GROUP),
        Rule::new(RuleSet, "Microsoft", MICROSOFT_GROUP),
        Rule::new(RuleSet, "Netflix", NETFLIX_GROUP),
        Rule::new(RuleSet, "X", X_GROUP),
        Rule::new(RuleSet, "Telegram", TELEGRAM_GROUP),
        // 其它国外流量
        Rule::new(RuleSet, "Global", NODE_SELECT),
        Rule::new(DomainSuffix, "linux.do", NODE_SELECT),
        Rule::new(RuleSet, "Reddit", NODE_SELECT),
        Rule::new(RuleSet, "Speedtest", NODE_SELECT),
        // 兜底
        Rule::fallback(FALLBACK_GROUP),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::providers::provider_names;
    use super::*;
    use crate::clash_proxy::types::RuleMatcher;
    use std::collections::HashSet;

    #[test]
    fn test_bypass_first_and_match_last() {
        let rules = build_rules();
        assert_eq!(rules[0].to_string(), "RULE-SET,China,DIRECT");
        assert_eq!(rules[1].to_string(), "RULE-SET,Lan,DIRECT");

        let matches: Vec<&Rule> = rules
            .iter()
            .filter(|r| r.matcher == RuleMatcher::Match)
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(rules.last().map(ToString::to_string).as_deref(), Some("MATCH,🐟 漏网之鱼"));
    }

    #[test]
    fn test_ai_rules_before_global() {
        let rules: Vec<String> = build_rules().iter().map(ToString::to_string).collect();
        let position = |rule: &str| rules.iter().position(|r| r == rule).unwrap();

        assert!(position("RULE-SET,OpenAI,🤖 AI服务") < position("RULE-SET,Global,🚀 节点选择"));
        assert!(position("DOMAIN-SUFFIX,x.ai,🤖 AI服务") < position("RULE-SET,X,X"));
        assert!(position("GEOIP,CN,DIRECT") < position("RULE-SET,OpenAI,🤖 AI服务"));
    }

    #[test]
    fn test_every_rule_set_is_declared() {
        let rules = build_rules();
        let declared: HashSet<&str> = provider_names().collect();
        let used: HashSet<&str> = rules
            .iter()
            .filter(|r| r.matcher == RuleMatcher::RuleSet)
            .filter_map(|r| r.value.as_deref())
            .collect();

        // 每个规则集都被引用，且不引用未声明的规则集
        assert_eq!(used, declared);
    }
}
