use std::{collections::BTreeMap, fmt::Display};

use serde::{Serialize, Serializer};

use crate::apisix::{Route, Upstream};

/// Inputs that were skipped without failing the translation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum TranslationWarning {
    UnsupportedBackendKind { rule: usize, backend: usize, kind: String },
    MissingBackendPort { rule: usize, backend: usize },
    NoResolvedBackends { rule: usize },
}

impl Display for TranslationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationWarning::UnsupportedBackendKind { rule, backend, kind } => {
                write!(f, "ignore non-service kind {kind} at Rules[{rule}].BackendRefs[{backend}]")
            },
            TranslationWarning::MissingBackendPort { rule, backend } => write!(f, "ignore nil port at Rules[{rule}].BackendRefs[{backend}]"),
            TranslationWarning::NoResolvedBackends { rule } => write!(f, "ignore all-failed backend refs at Rules[{rule}]"),
        }
    }
}

/// Routes and upstreams generated from one HTTPRoute, unique by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TranslationContext {
    #[serde(serialize_with = "serialize_values")]
    routes: BTreeMap<String, Route>,
    #[serde(serialize_with = "serialize_values")]
    upstreams: BTreeMap<String, Upstream>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<TranslationWarning>,
}

impl TranslationContext {
    /// Adds the route, replacing any route with the same id.
    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route.id.clone(), route);
    }

    /// Adds the upstream, replacing any upstream with the same id.
    pub fn add_upstream(&mut self, upstream: Upstream) {
        self.upstreams.insert(upstream.id.clone(), upstream);
    }

    pub(crate) fn add_warning(&mut self, warning: TranslationWarning) {
        self.warnings.push(warning);
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn upstreams(&self) -> impl Iterator<Item = &Upstream> {
        self.upstreams.values()
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn upstream(&self, id: &str) -> Option<&Upstream> {
        self.upstreams.get(id)
    }

    pub fn warnings(&self) -> &[TranslationWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.upstreams.is_empty()
    }
}

fn serialize_values<S, V>(map: &BTreeMap<String, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_seq(map.values())
}
