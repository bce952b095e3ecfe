use serde_yaml::Value;

/// 代理节点的只读视图，只关心 `name`，其余字段原样保留
#[derive(Debug, Clone, Copy)]
pub struct ProxyNode<'a> {
    raw: &'a Value,
}

impl<'a> ProxyNode<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    /// 节点名称，非字符串或缺失时为 `None`
    pub fn name(&self) -> Option<&'a str> {
        self.raw.get("name").and_then(Value::as_str)
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }
}

/// 取出配置中的 `proxies` 序列；缺失、非序列或为空时返回 `None`
pub fn proxy_pool(config: &Value) -> Option<&Vec<Value>> {
    match config.get("proxies") {
        Some(Value::Sequence(list)) if !list.is_empty() => Some(list),
        _ => None,
    }
}

pub fn proxy_nodes(config: &Value) -> Vec<ProxyNode<'_>> {
    proxy_pool(config)
        .map(|list| list.iter().map(ProxyNode::new).collect())
        .unwrap_or_default()
}
