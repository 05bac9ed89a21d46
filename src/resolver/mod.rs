//! Turning a backend service reference into an upstream with nodes.
mod snapshot;

pub use snapshot::ServiceSnapshotResolver;
use thiserror::Error;

use crate::{
    apisix::{ResolveGranularity, Upstream},
    common::ResourceKey,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceReference<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
    pub port: i32,
    pub granularity: ResolveGranularity,
}

#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("service {0} not found")]
    ServiceNotFound(ResourceKey),
    #[error("endpoints {0} not found")]
    EndpointsNotFound(ResourceKey),
    #[error("port {port} not defined in service {key}")]
    PortNotDefined { key: ResourceKey, port: i32 },
    #[error("service {0} has no cluster ip")]
    NoClusterIp(ResourceKey),
    #[error("service resolver unavailable: {0}")]
    Unavailable(String),
}

/// Resolves services to upstreams. Calls block and are not retried by the translator.
pub trait ServiceTranslator: Send + Sync {
    /// Returns an upstream carrying only its nodes; naming and labelling is left to the caller.
    fn translate_service(&self, reference: &ServiceReference<'_>) -> Result<Upstream, ResolveError>;
}
