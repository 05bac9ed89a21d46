use std::fmt::Display;

use k8s_openapi::{
    api::core::v1::{Endpoints, Service},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{Resource, ResourceExt};

use super::create_id;
use crate::httproutes::{HTTPBackendReference, HTTPRoute};

pub const DEFAULT_GROUP_NAME: &str = "gateway.networking.k8s.io";
pub const CORE_GROUP_NAME: &str = "";
pub const DEFAULT_NAMESPACE_NAME: &str = "default";
pub const DEFAULT_KIND_NAME: &str = "HTTPRoute";
pub const SERVICE_KIND_NAME: &str = "Service";
pub const ENDPOINTS_KIND_NAME: &str = "Endpoints";
pub const KUBERNETES_NONE: &str = "None";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ResourceKey {
    pub group: String,
    pub namespace: String,
    pub name: String,
    pub kind: String,
}

impl ResourceKey {
    pub fn service(name: &str, namespace: &str) -> Self {
        Self {
            group: CORE_GROUP_NAME.to_owned(),
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            kind: SERVICE_KIND_NAME.to_owned(),
        }
    }

    fn from_meta(value: &ObjectMeta, group: &str, kind: &str) -> Self {
        let namespace = value.namespace.clone().unwrap_or(DEFAULT_NAMESPACE_NAME.to_owned());

        let name = match (value.name.as_ref(), value.generate_name.as_ref()) {
            (None, None) => "",
            (Some(name), _) | (None, Some(name)) => name,
        };
        Self {
            group: group.to_owned(),
            namespace,
            name: name.to_owned(),
            kind: kind.to_owned(),
        }
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", create_id(&self.name, &self.namespace))
    }
}

impl From<&HTTPRoute> for ResourceKey {
    fn from(value: &HTTPRoute) -> Self {
        let namespace = value.meta().namespace.clone().unwrap_or(DEFAULT_NAMESPACE_NAME.to_owned());

        Self {
            group: DEFAULT_GROUP_NAME.to_owned(),
            namespace,
            name: value.name_any(),
            kind: DEFAULT_KIND_NAME.to_owned(),
        }
    }
}

impl From<&Service> for ResourceKey {
    fn from(service: &Service) -> Self {
        Self::from_meta(&service.metadata, CORE_GROUP_NAME, SERVICE_KIND_NAME)
    }
}

impl From<&Endpoints> for ResourceKey {
    fn from(endpoints: &Endpoints) -> Self {
        Self::from_meta(&endpoints.metadata, CORE_GROUP_NAME, ENDPOINTS_KIND_NAME)
    }
}

impl From<(&HTTPBackendReference, &str)> for ResourceKey {
    fn from((value, route_namespace): (&HTTPBackendReference, &str)) -> Self {
        Self {
            group: value.group.clone().unwrap_or(CORE_GROUP_NAME.to_owned()),
            namespace: value.namespace.clone().unwrap_or(route_namespace.to_owned()),
            name: value.name.clone(),
            kind: value.kind.clone().unwrap_or(SERVICE_KIND_NAME.to_owned()),
        }
    }
}
