//! Resources of the APISIX admin API produced by the translator.
mod id;
mod plugins;
mod route;
mod upstream;

pub use id::{route_id, upstream_id};
pub use plugins::{
    PluginConfig, Plugins, RedirectConfig, RewriteConfig, TrafficSplitConfig, TrafficSplitRule, WeightedUpstream, PROXY_REWRITE, REDIRECT,
    TRAFFIC_SPLIT,
};
pub use route::{Route, Var, VarOperator};
pub use upstream::{ResolveGranularity, Upstream, UpstreamNode};

pub const LABEL_MANAGED_BY: &str = "managed-by";
pub const LABEL_NAMESPACE: &str = "meta_namespace";
pub const LABEL_BACKEND: &str = "meta_backend";
pub const LABEL_PORT: &str = "meta_port";
/// APISIX schema limit for label values.
pub const MAX_LABEL_VALUE_LENGTH: usize = 64;

pub fn compose_route_name(namespace: &str, name: &str, rule: &str) -> String {
    format!("{namespace}_{name}_{rule}")
}

pub fn compose_upstream_name(namespace: &str, name: &str, subset: Option<&str>, port: i32, granularity: ResolveGranularity) -> String {
    let mut upstream_name = format!("{namespace}_{name}_");
    if let Some(subset) = subset.filter(|subset| !subset.is_empty()) {
        upstream_name.push_str(subset);
        upstream_name.push('_');
    }
    upstream_name.push_str(&port.to_string());
    if granularity == ResolveGranularity::Service {
        upstream_name.push('_');
        upstream_name.push_str(granularity.as_str());
    }
    upstream_name
}
