use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_yaml::Value;
use std::fs;

use clash_enrich::clash_proxy::{OTHER_REGION, matches_other_region, region_counts, unclassified};
use clash_enrich::config::Settings;
use clash_enrich::proxy::proxy_nodes;
use clash_enrich::{ConfigEnricher, verify_references};

/// Clash 配置增强工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 原始配置文件路径
    #[arg(short, long)]
    input: String,

    /// 输出路径，缺省时写到标准输出
    #[arg(short, long)]
    output: Option<String>,

    /// 订阅名称
    #[arg(short, long, default_value = "default")]
    profile: String,

    /// 生成器配置文件路径
    #[arg(short = 'f', long)]
    settings: Option<String>,

    /// 规则集镜像地址
    #[arg(long)]
    mirror: Option<String>,

    /// 规则集本地缓存目录
    #[arg(long)]
    ruleset_dir: Option<String>,

    /// 日志级别
    #[arg(long)]
    log_level: Option<String>,

    /// 打印各地区命中的节点数
    #[arg(long)]
    summary: bool,

    /// 校验策略组与规则引用
    #[arg(long)]
    check: bool,

    /// 详细输出
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("加载生成器配置失败: {path}"))?,
        None => Settings::default(),
    };

    // 覆盖命令行参数
    if let Some(mirror) = &args.mirror {
        settings.mirror_url = mirror.clone();
    }
    if let Some(dir) = &args.ruleset_dir {
        settings.ruleset_dir = dir.clone();
    }
    if let Some(level) = &args.log_level {
        settings.log_level = level.clone();
    }

    settings.validate()?;
    Ok(settings)
}

fn init_logger(settings: &Settings, verbose: bool) {
    let level = if verbose { "debug" } else { settings.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_summary(config: &Value) {
    let nodes = proxy_nodes(config);
    let names: Vec<&str> = nodes.iter().filter_map(|node| node.name()).collect();

    eprintln!("\n地区分布:");
    eprintln!("{:=<60}", "");
    eprintln!("总节点数: {}", nodes.len());

    for (region, count) in region_counts(&names) {
        eprintln!("  {}: {}", region.group_name(), count);
    }
    let other = names.iter().filter(|name| matches_other_region(name)).count();
    eprintln!("  {OTHER_REGION}: {other}");

    let unmatched = unclassified(&names);
    if !unmatched.is_empty() {
        eprintln!("\n未归类节点（仅可通过节点选择手动选择）:");
        for name in unmatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("{:-<60}", "");
}

fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();
    let settings = load_settings(&args)?;
    init_logger(&settings, args.verbose);

    info!("读取配置文件: {}", args.input);
    let content =
        fs::read_to_string(&args.input).with_context(|| format!("读取配置失败: {}", args.input))?;
    let config: Value =
        serde_yaml::from_str(&content).with_context(|| format!("解析配置失败: {}", args.input))?;

    if args.summary {
        print_summary(&config);
    }

    let enriched = ConfigEnricher::new(settings).enrich(config, &args.profile);

    if args.check {
        verify_references(&enriched).context("引用校验失败")?;
        info!("策略组与规则引用校验通过");
    }

    let yaml = serde_yaml::to_string(&enriched)?;
    match &args.output {
        Some(path) => {
            fs::write(path, yaml).with_context(|| format!("写入失败: {path}"))?;
            info!("已写入: {path}");
        }
        None => print!("{yaml}"),
    }

    Ok(())
}
