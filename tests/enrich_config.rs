use clash_enrich::clash_proxy::{
    OTHER_REGION, PROXY_GROUPS_KEY, RULES_KEY, Region, classify, region_counts, unclassified,
};
use clash_enrich::proxy::proxy_nodes;
use clash_enrich::{EnrichError, Settings, enrich, enrich_with, verify_references};
use serde_yaml::Value;

const SAMPLE: &str = r#"
mixed-port: 7890
allow-lan: false
proxies:
  - {name: "🇭🇰 香港 01", type: ss, server: 1.1.1.1, port: 8388, cipher: aes-256-gcm, password: a}
  - {name: "台湾 TW-02", type: vmess, server: 2.2.2.2, port: 443, uuid: 00000000-0000-0000-0000-000000000000, alterId: 0, cipher: auto}
  - {name: "Japan Tokyo", type: trojan, server: 3.3.3.3, port: 443, password: b, sni: example.com}
  - {name: "Korea Seoul", type: trojan, server: 4.4.4.4, port: 443, password: c}
  - {name: "random-node", type: http, server: 5.5.5.5, port: 8080}
"#;

fn sample() -> Value {
    serde_yaml::from_str(SAMPLE).unwrap()
}

#[test]
fn enriches_sample_subscription() {
    let input = sample();
    let output = enrich(input.clone(), "机场A");

    assert_eq!(output["proxies"], input["proxies"]);
    assert_eq!(output["mixed-port"].as_u64(), Some(7890));
    assert!(verify_references(&output).is_ok());

    let groups = output[PROXY_GROUPS_KEY].as_sequence().unwrap();
    let tail: Vec<&str> = groups[groups.len() - 6..]
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    let mut expected: Vec<&str> = Region::ALL.iter().map(|r| r.group_name()).collect();
    expected.push(OTHER_REGION);
    assert_eq!(tail, expected);

    let rules = output[RULES_KEY].as_sequence().unwrap();
    assert_eq!(rules.last().and_then(Value::as_str), Some("MATCH,🐟 漏网之鱼"));
}

#[test]
fn empty_subscription_is_untouched() {
    let input: Value = serde_yaml::from_str("proxies: []\nmode: global\n").unwrap();
    assert_eq!(enrich_with(input.clone(), "空订阅", &Settings::default()), input);
}

#[test]
fn output_is_stable_across_runs() {
    let first = serde_yaml::to_string(&enrich(sample(), "p")).unwrap();
    let second = serde_yaml::to_string(&enrich(sample(), "p")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sample_nodes_classify_as_expected() {
    assert_eq!(classify("🇭🇰 香港 01"), vec![Region::HongKong]);
    assert_eq!(classify("台湾 TW-02"), vec![Region::Taiwan]);
    assert_eq!(classify("Japan Tokyo"), vec![Region::Japan]);
    assert!(classify("Korea Seoul").is_empty());
    assert!(classify("random-node").is_empty());
}

#[test]
fn check_reports_renamed_group() {
    let mut output = enrich(sample(), "p");

    // 把漏网之鱼改名后，MATCH 规则的目标不再存在
    let groups = output[PROXY_GROUPS_KEY].as_sequence_mut().unwrap();
    let fallback = groups
        .iter_mut()
        .find(|g| g["name"].as_str() == Some("🐟 漏网之鱼"))
        .unwrap();
    fallback["name"] = Value::String("兜底".to_string());

    match verify_references(&output) {
        Err(EnrichError::DanglingReference { owner, target }) => {
            assert_eq!(target, "🐟 漏网之鱼");
            assert!(owner.contains("MATCH"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn summary_helpers_list_unclassified_nodes() {
    let input = sample();
    let nodes = proxy_nodes(&input);
    let names: Vec<&str> = nodes.iter().filter_map(|node| node.name()).collect();

    assert_eq!(unclassified(&names), vec!["random-node"]);

    let counts = region_counts(&names);
    assert_eq!(counts.len(), Region::ALL.len());
    assert_eq!(counts[0], (Region::HongKong, 1));
    assert_eq!(counts[1], (Region::Taiwan, 1));
    assert_eq!(counts[2], (Region::Japan, 1));
}
