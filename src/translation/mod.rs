//! HTTPRoute to APISIX translation.
//!
//! For every rule the backends are resolved and the filters compiled once, then
//! one route is emitted per match, all sharing the rule's plugins and upstreams.
mod backends;
mod context;
mod filters;
mod http_route;
mod matches;

pub use context::{TranslationContext, TranslationWarning};
pub use matches::{CompiledMatch, MatchError};
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::{
    apisix::ResolveGranularity,
    configuration::Configuration,
    resolver::{ResolveError, ServiceTranslator},
};

pub const DEFAULT_CONTROLLER_NAME: &str = "apisix-translator";

#[derive(Error, Debug, PartialEq)]
pub enum TranslationError {
    #[error("failed to translate Rules[{rule}].Matches[{matcher}]: {source}")]
    Match { rule: usize, matcher: usize, source: MatchError },
    #[error("failed to translate Rules[{rule}].BackendRefs[{backend}]: {source}")]
    Backend { rule: usize, backend: usize, source: ResolveError },
}

/// Translates HTTPRoutes. Holds no state between calls, so one translator can serve concurrent reconciliations.
#[derive(TypedBuilder)]
pub struct HTTPRouteTranslator<'a> {
    service_translator: &'a dyn ServiceTranslator,
    #[builder(default)]
    resolve_granularity: ResolveGranularity,
    #[builder(default = DEFAULT_CONTROLLER_NAME.to_owned(), setter(into))]
    controller_name: String,
}

impl<'a> HTTPRouteTranslator<'a> {
    pub fn with_configuration(configuration: &Configuration, service_translator: &'a dyn ServiceTranslator) -> Self {
        HTTPRouteTranslator::builder()
            .service_translator(service_translator)
            .resolve_granularity(configuration.resolve_granularity)
            .controller_name(configuration.controller_name.clone())
            .build()
    }
}
