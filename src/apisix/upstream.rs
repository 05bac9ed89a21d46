use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_LOAD_BALANCER: &str = "roundrobin";
const DEFAULT_SCHEME: &str = "http";

/// Precision at which a backend is resolved into upstream nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveGranularity {
    /// One node per endpoint address backing the service.
    #[default]
    Endpoint,
    /// A single node pointing at the service cluster IP.
    Service,
}

impl ResolveGranularity {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolveGranularity::Endpoint => "endpoint",
            ResolveGranularity::Service => "service",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpstreamNode {
    pub host: String,
    pub port: i32,
    pub weight: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Upstream {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(rename = "type")]
    pub load_balancer: String,
    pub scheme: String,
    pub nodes: Vec<UpstreamNode>,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            id: String::default(),
            name: String::default(),
            labels: BTreeMap::default(),
            load_balancer: DEFAULT_LOAD_BALANCER.to_owned(),
            scheme: DEFAULT_SCHEME.to_owned(),
            nodes: Vec::default(),
        }
    }
}
