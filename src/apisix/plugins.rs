use std::collections::BTreeMap;

use serde::Serialize;

pub const PROXY_REWRITE: &str = "proxy-rewrite";
pub const REDIRECT: &str = "redirect";
pub const TRAFFIC_SPLIT: &str = "traffic-split";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginConfig {
    ProxyRewrite(RewriteConfig),
    Redirect(RedirectConfig),
    TrafficSplit(TrafficSplitConfig),
}

impl PluginConfig {
    pub fn name(&self) -> &'static str {
        match self {
            PluginConfig::ProxyRewrite(_) => PROXY_REWRITE,
            PluginConfig::Redirect(_) => REDIRECT,
            PluginConfig::TrafficSplit(_) => TRAFFIC_SPLIT,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RewriteConfig {
    pub headers: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RedirectConfig {
    pub ret_code: i32,
    pub uri: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrafficSplitConfig {
    pub rules: Vec<TrafficSplitRule>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrafficSplitRule {
    pub weighted_upstreams: Vec<WeightedUpstream>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeightedUpstream {
    pub upstream_id: String,
    pub weight: i32,
}

/// Plugins attached to a route, keyed by plugin name. At most one configuration per plugin.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Plugins(BTreeMap<&'static str, PluginConfig>);

impl Plugins {
    pub fn insert(&mut self, config: PluginConfig) -> Option<PluginConfig> {
        self.0.insert(config.name(), config)
    }

    pub fn remove(&mut self, name: &str) -> Option<PluginConfig> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&PluginConfig> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
