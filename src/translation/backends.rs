use tracing::{debug, warn};

use super::{HTTPRouteTranslator, TranslationContext, TranslationError, TranslationWarning};
use crate::{
    apisix::{
        compose_upstream_name, upstream_id, Route, TrafficSplitConfig, TrafficSplitRule, WeightedUpstream, LABEL_BACKEND, LABEL_MANAGED_BY,
        LABEL_NAMESPACE, LABEL_PORT, MAX_LABEL_VALUE_LENGTH,
    },
    common::{truncate, ResourceKey, SERVICE_KIND_NAME},
    httproutes::HTTPBackendReference,
    resolver::ServiceReference,
};

const DEFAULT_BACKEND_WEIGHT: i32 = 1;

/// Upstreams a rule resolved to, in backend reference order.
#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct ResolvedBackends {
    weighted_upstreams: Vec<WeightedUpstream>,
}

impl ResolvedBackends {
    pub fn is_empty(&self) -> bool {
        self.weighted_upstreams.is_empty()
    }

    pub fn bind(&self, route: &mut Route) {
        match self.weighted_upstreams.as_slice() {
            [] => {},
            [single] => route.bind_upstream(single.upstream_id.clone()),
            weighted_upstreams => route.bind_traffic_split(TrafficSplitConfig {
                rules: vec![TrafficSplitRule { weighted_upstreams: weighted_upstreams.to_vec() }],
            }),
        }
    }
}

impl HTTPRouteTranslator<'_> {
    /// Resolves the backends of one rule, adding their upstreams to `context`.
    ///
    /// Unsupported kinds and missing ports only skip the backend. A resolver failure fails the whole translation.
    pub(super) fn aggregate_backends(
        &self,
        route_key: &ResourceKey,
        rule_index: usize,
        backend_refs: &[HTTPBackendReference],
        context: &mut TranslationContext,
    ) -> Result<ResolvedBackends, TranslationError> {
        let mut resolved = ResolvedBackends::default();

        for (backend_index, backend) in backend_refs.iter().enumerate() {
            let backend_key = ResourceKey::from((backend, route_key.namespace.as_str()));
            if !backend_key.kind.eq_ignore_ascii_case(SERVICE_KIND_NAME) {
                warn!("{route_key} ignore non-service kind {} at Rules[{rule_index}].BackendRefs[{backend_index}]", backend_key.kind);
                context.add_warning(TranslationWarning::UnsupportedBackendKind {
                    rule: rule_index,
                    backend: backend_index,
                    kind: backend_key.kind,
                });
                continue;
            }

            let Some(port) = backend.port else {
                warn!("{route_key} ignore nil port at Rules[{rule_index}].BackendRefs[{backend_index}]");
                context.add_warning(TranslationWarning::MissingBackendPort { rule: rule_index, backend: backend_index });
                continue;
            };

            let reference = ServiceReference {
                namespace: &backend_key.namespace,
                name: &backend_key.name,
                port,
                granularity: self.resolve_granularity,
            };
            let mut upstream = self
                .service_translator
                .translate_service(&reference)
                .map_err(|source| TranslationError::Backend { rule: rule_index, backend: backend_index, source })?;

            let name = compose_upstream_name(&backend_key.namespace, &backend_key.name, None, port, self.resolve_granularity);
            upstream.labels.extend([
                (LABEL_MANAGED_BY.to_owned(), truncate(&self.controller_name, MAX_LABEL_VALUE_LENGTH)),
                (LABEL_NAMESPACE.to_owned(), truncate(&backend_key.namespace, MAX_LABEL_VALUE_LENGTH)),
                (LABEL_BACKEND.to_owned(), truncate(&backend_key.name, MAX_LABEL_VALUE_LENGTH)),
                (LABEL_PORT.to_owned(), truncate(&port.to_string(), MAX_LABEL_VALUE_LENGTH)),
            ]);
            upstream.id = upstream_id(&name);
            upstream.name = name;
            debug!("{route_key} Rules[{rule_index}].BackendRefs[{backend_index}] resolved to upstream {}", upstream.name);

            resolved.weighted_upstreams.push(WeightedUpstream {
                upstream_id: upstream.id.clone(),
                weight: backend.weight.unwrap_or(DEFAULT_BACKEND_WEIGHT),
            });
            context.add_upstream(upstream);
        }

        Ok(resolved)
    }
}
