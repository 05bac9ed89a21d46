use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Endpoints, Service, ServicePort};
use serde::Deserialize;
use tracing::debug;

use super::{ResolveError, ServiceReference, ServiceTranslator};
use crate::{
    apisix::{ResolveGranularity, Upstream, UpstreamNode},
    common::{ResourceKey, KUBERNETES_NONE},
};

const DEFAULT_NODE_WEIGHT: i32 = 100;

/// Resolves services against a fixed set of `Service` and `Endpoints` objects, as held by an informer cache.
#[derive(Clone, Debug, Default)]
pub struct ServiceSnapshotResolver {
    services: BTreeMap<ResourceKey, Service>,
    endpoints: BTreeMap<ResourceKey, Endpoints>,
}

impl ServiceSnapshotResolver {
    #[must_use]
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.insert(ResourceKey::from(&service), service);
        self
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        let key = ResourceKey::from(&endpoints);
        self.endpoints.insert(ResourceKey::service(&key.name, &key.namespace), endpoints);
        self
    }

    /// Loads a multi-document YAML stream. Documents of other kinds are skipped.
    pub fn from_yaml(documents: &str) -> crate::Result<Self> {
        let mut resolver = Self::default();
        for document in serde_yaml::Deserializer::from_str(documents) {
            let value = serde_yaml::Value::deserialize(document)?;
            let kind = value.get("kind").and_then(serde_yaml::Value::as_str).map(str::to_owned);
            match kind.as_deref() {
                Some("Service") => resolver = resolver.with_service(serde_yaml::from_value(value)?),
                Some("Endpoints") => resolver = resolver.with_endpoints(serde_yaml::from_value(value)?),
                kind => debug!("Skipping snapshot document of kind {kind:?}"),
            }
        }
        Ok(resolver)
    }

    fn endpoint_nodes(&self, key: &ResourceKey, service_port: &ServicePort) -> Result<Vec<UpstreamNode>, ResolveError> {
        let endpoints = self.endpoints.get(key).ok_or_else(|| ResolveError::EndpointsNotFound(key.clone()))?;
        let nodes = endpoints
            .subsets
            .iter()
            .flatten()
            .flat_map(|subset| {
                let port = subset.ports.iter().flatten().find(|port| port.name == service_port.name).map(|port| port.port);
                subset.addresses.iter().flatten().filter_map(move |address| {
                    port.map(|port| UpstreamNode { host: address.ip.clone(), port, weight: DEFAULT_NODE_WEIGHT })
                })
            })
            .collect();
        Ok(nodes)
    }
}

impl ServiceTranslator for ServiceSnapshotResolver {
    fn translate_service(&self, reference: &ServiceReference<'_>) -> Result<Upstream, ResolveError> {
        let key = ResourceKey::service(reference.name, reference.namespace);
        let service = self.services.get(&key).ok_or_else(|| ResolveError::ServiceNotFound(key.clone()))?;
        let spec = service.spec.as_ref();

        let service_port = spec
            .and_then(|spec| spec.ports.as_ref())
            .and_then(|ports| ports.iter().find(|port| port.port == reference.port))
            .ok_or_else(|| ResolveError::PortNotDefined { key: key.clone(), port: reference.port })?;

        let nodes = match reference.granularity {
            ResolveGranularity::Endpoint => self.endpoint_nodes(&key, service_port)?,
            ResolveGranularity::Service => {
                let cluster_ip = spec
                    .and_then(|spec| spec.cluster_ip.as_deref())
                    .filter(|ip| !ip.is_empty() && *ip != KUBERNETES_NONE)
                    .ok_or_else(|| ResolveError::NoClusterIp(key.clone()))?;
                vec![UpstreamNode { host: cluster_ip.to_owned(), port: reference.port, weight: DEFAULT_NODE_WEIGHT }]
            },
        };
        debug!("Resolved {key} port {} into {} nodes", reference.port, nodes.len());

        Ok(Upstream { nodes, ..Default::default() })
    }
}

#[cfg(test)]
mod test {
    use super::ServiceSnapshotResolver;
    use crate::{
        apisix::{ResolveGranularity, UpstreamNode},
        common::ResourceKey,
        resolver::{ResolveError, ServiceReference, ServiceTranslator},
    };

    const SNAPSHOT: &str = r"
apiVersion: v1
kind: Service
metadata:
  name: httpbin
  namespace: apps
spec:
  clusterIP: 10.96.0.10
  ports:
  - name: http
    port: 80
    targetPort: 8080
  - name: admin
    port: 9000
---
apiVersion: v1
kind: Endpoints
metadata:
  name: httpbin
  namespace: apps
subsets:
- addresses:
  - ip: 10.244.0.5
  - ip: 10.244.0.6
  ports:
  - name: http
    port: 8080
  - name: admin
    port: 9001
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: unrelated
  namespace: apps
";

    fn reference(port: i32, granularity: ResolveGranularity) -> ServiceReference<'static> {
        ServiceReference { namespace: "apps", name: "httpbin", port, granularity }
    }

    #[test]
    pub fn test_endpoint_granularity() {
        let resolver = ServiceSnapshotResolver::from_yaml(SNAPSHOT).unwrap();
        let upstream = resolver.translate_service(&reference(80, ResolveGranularity::Endpoint)).unwrap();
        assert_eq!(
            upstream.nodes,
            vec![
                UpstreamNode { host: "10.244.0.5".to_owned(), port: 8080, weight: 100 },
                UpstreamNode { host: "10.244.0.6".to_owned(), port: 8080, weight: 100 },
            ]
        );
        assert_eq!(upstream.load_balancer, "roundrobin");

        let upstream = resolver.translate_service(&reference(9000, ResolveGranularity::Endpoint)).unwrap();
        assert!(upstream.nodes.iter().all(|node| node.port == 9001));
    }

    #[test]
    pub fn test_service_granularity() {
        let resolver = ServiceSnapshotResolver::from_yaml(SNAPSHOT).unwrap();
        let upstream = resolver.translate_service(&reference(80, ResolveGranularity::Service)).unwrap();
        assert_eq!(upstream.nodes, vec![UpstreamNode { host: "10.96.0.10".to_owned(), port: 80, weight: 100 }]);
    }

    #[test]
    pub fn test_resolution_errors() {
        let resolver = ServiceSnapshotResolver::from_yaml(SNAPSHOT).unwrap();
        assert_eq!(
            resolver.translate_service(&reference(81, ResolveGranularity::Endpoint)),
            Err(ResolveError::PortNotDefined { key: ResourceKey::service("httpbin", "apps"), port: 81 })
        );

        let missing = ServiceReference { namespace: "apps", name: "nope", port: 80, granularity: ResolveGranularity::Endpoint };
        assert_eq!(resolver.translate_service(&missing), Err(ResolveError::ServiceNotFound(ResourceKey::service("nope", "apps"))));

        let without_endpoints = ServiceSnapshotResolver::default().with_service(serde_yaml::from_str(SNAPSHOT.split("---").next().unwrap()).unwrap());
        assert_eq!(
            without_endpoints.translate_service(&reference(80, ResolveGranularity::Endpoint)),
            Err(ResolveError::EndpointsNotFound(ResourceKey::service("httpbin", "apps")))
        );
    }

    #[test]
    pub fn test_headless_service_has_no_cluster_ip() {
        let service = serde_yaml::from_str(
            r"
apiVersion: v1
kind: Service
metadata:
  name: httpbin
  namespace: apps
spec:
  clusterIP: None
  ports:
  - port: 80
",
        )
        .unwrap();
        let resolver = ServiceSnapshotResolver::default().with_service(service);
        assert_eq!(
            resolver.translate_service(&reference(80, ResolveGranularity::Service)),
            Err(ResolveError::NoClusterIp(ResourceKey::service("httpbin", "apps")))
        );
    }
}
