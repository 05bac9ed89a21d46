use std::collections::BTreeMap;

use serde::Serialize;

use super::{PluginConfig, Plugins, TrafficSplitConfig, LABEL_MANAGED_BY, MAX_LABEL_VALUE_LENGTH, TRAFFIC_SPLIT};
use crate::common::truncate;

const ROUTE_DESCRIPTION: &str = "Created by apisix-translator, DO NOT modify it manually";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VarOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "~~")]
    RegexMatch,
}

/// A `[variable, operator, value]` condition. All vars of a route must hold, in listed order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Var(pub String, pub VarOperator, pub String);

impl Var {
    pub fn new(variable: impl Into<String>, operator: VarOperator, value: impl Into<String>) -> Self {
        Self(variable.into(), operator, value.into())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub uri: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<Var>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    #[serde(skip_serializing_if = "Plugins::is_empty")]
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_id: Option<String>,
}

impl Route {
    pub fn managed_by(controller_name: &str) -> Self {
        Self {
            desc: ROUTE_DESCRIPTION.to_owned(),
            labels: BTreeMap::from([(LABEL_MANAGED_BY.to_owned(), truncate(controller_name, MAX_LABEL_VALUE_LENGTH))]),
            ..Default::default()
        }
    }

    pub fn upstream_id(&self) -> Option<&str> {
        self.upstream_id.as_deref()
    }

    pub fn traffic_split(&self) -> Option<&TrafficSplitConfig> {
        match self.plugins.get(TRAFFIC_SPLIT) {
            Some(PluginConfig::TrafficSplit(config)) => Some(config),
            _ => None,
        }
    }

    /// Sends all traffic to a single upstream, dropping any traffic split.
    pub fn bind_upstream(&mut self, upstream_id: String) {
        self.plugins.remove(TRAFFIC_SPLIT);
        self.upstream_id = Some(upstream_id);
    }

    /// Spreads traffic over weighted upstreams, dropping any direct upstream binding.
    pub fn bind_traffic_split(&mut self, traffic_split: TrafficSplitConfig) {
        self.upstream_id = None;
        self.plugins.insert(PluginConfig::TrafficSplit(traffic_split));
    }
}
