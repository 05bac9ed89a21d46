use itertools::Itertools;
use tracing::{debug, info, warn};

use super::{filters::compile_filters, matches::CompiledMatch, HTTPRouteTranslator, TranslationContext, TranslationError, TranslationWarning};
use crate::{
    apisix::{compose_route_name, route_id, Route},
    common::ResourceKey,
    httproutes::{HTTPRoute, RouteMatch},
};

impl HTTPRouteTranslator<'_> {
    /// Translates one HTTPRoute into a fresh context.
    ///
    /// Unknown match types and resolver failures abort the translation and nothing is returned for the other rules.
    pub fn translate(&self, kube_route: &HTTPRoute) -> Result<TranslationContext, TranslationError> {
        let route_key = ResourceKey::from(kube_route);
        let mut context = TranslationContext::default();

        // listener hostnames are not intersected with these
        let hosts = kube_route.spec.hostnames.clone().unwrap_or_default();
        debug!("{route_key} translating with hosts {}", hosts.iter().join(","));

        for (rule_index, rule) in kube_route.spec.rules.iter().flatten().enumerate() {
            let backend_refs = rule.backend_refs.as_deref().unwrap_or_default();
            if backend_refs.is_empty() {
                debug!("{route_key} Rules[{rule_index}] has no backend refs");
                continue;
            }

            let backends = self.aggregate_backends(&route_key, rule_index, backend_refs, &mut context)?;
            if backends.is_empty() {
                warn!("{route_key} ignore all-failed backend refs at Rules[{rule_index}]");
                context.add_warning(TranslationWarning::NoResolvedBackends { rule: rule_index });
                continue;
            }

            let plugins = compile_filters(rule.filters.as_deref().unwrap_or_default());

            let default_matches = [CompiledMatch::default_route_match()];
            let matches: &[RouteMatch] = match rule.matches.as_deref() {
                Some(matches) if !matches.is_empty() => matches,
                _ => &default_matches,
            };

            for (match_index, route_match) in matches.iter().enumerate() {
                let compiled = CompiledMatch::try_from(route_match).map_err(|source| TranslationError::Match {
                    rule: rule_index,
                    matcher: match_index,
                    source,
                })?;

                let name = compose_route_name(&route_key.namespace, &route_key.name, &format!("{rule_index}-{match_index}"));
                let mut route = Route::managed_by(&self.controller_name);
                route.id = route_id(&name);
                route.name = name;
                route.uri = compiled.uri;
                route.vars = compiled.vars;
                route.methods = compiled.methods;
                route.hosts.clone_from(&hosts);
                route.plugins = plugins.clone();
                backends.bind(&mut route);

                context.add_route(route);
            }
        }

        info!(
            "{route_key} translated into {} routes and {} upstreams with {} warnings",
            context.routes().count(),
            context.upstreams().count(),
            context.warnings().len()
        );
        Ok(context)
    }
}
