use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    apisix::{PluginConfig, Plugins, RedirectConfig, RewriteConfig},
    httproutes::{FilterType, HTTPRouteFilter, HeaderModifier, RequestRedirect},
};

const DEFAULT_REDIRECT_STATUS_CODE: i32 = 302;
const REQUEST_SCHEME: &str = "$scheme";
const REQUEST_HOST: &str = "$host";
const REQUEST_URI: &str = "$request_uri";

enum RouteFilter<'a> {
    RequestHeaderModifier(&'a HeaderModifier),
    RequestRedirect(&'a RequestRedirect),
    Ignored(&'a FilterType),
}

impl<'a> From<&'a HTTPRouteFilter> for RouteFilter<'a> {
    fn from(filter: &'a HTTPRouteFilter) -> Self {
        match (&filter.r#type, filter.request_header_modifier.as_ref(), filter.request_redirect.as_ref()) {
            (FilterType::RequestHeaderModifier, Some(modifier), _) => RouteFilter::RequestHeaderModifier(modifier),
            (FilterType::RequestRedirect, _, Some(redirect)) => RouteFilter::RequestRedirect(redirect),
            (filter_type, _, _) => RouteFilter::Ignored(filter_type),
        }
    }
}

/// Builds the plugins shared by every route of a rule. Filters without a plugin counterpart are skipped.
pub fn compile_filters(filters: &[HTTPRouteFilter]) -> Plugins {
    let mut plugins = Plugins::default();
    for filter in filters {
        match RouteFilter::from(filter) {
            RouteFilter::RequestHeaderModifier(modifier) => {
                plugins.insert(PluginConfig::ProxyRewrite(rewrite_headers(modifier)));
            },
            RouteFilter::RequestRedirect(redirect) => {
                plugins.insert(PluginConfig::Redirect(redirect_config(redirect)));
            },
            RouteFilter::Ignored(filter_type) => debug!("Ignoring unsupported filter {filter_type}"),
        }
    }
    plugins
}

// proxy-rewrite only knows "set", so add and set collapse and a removal is an empty value
fn rewrite_headers(modifier: &HeaderModifier) -> RewriteConfig {
    let mut headers = BTreeMap::new();
    for header in modifier.add.iter().flatten().chain(modifier.set.iter().flatten()) {
        headers.insert(header.name.clone(), header.value.clone());
    }
    for name in modifier.remove.iter().flatten() {
        headers.insert(name.clone(), String::new());
    }
    RewriteConfig { headers }
}

fn redirect_config(redirect: &RequestRedirect) -> RedirectConfig {
    let scheme = redirect.scheme.as_deref().unwrap_or(REQUEST_SCHEME);
    let hostname = redirect.hostname.as_deref().unwrap_or(REQUEST_HOST);
    let uri = match redirect.port {
        Some(port) => format!("{scheme}://{hostname}:{port}{REQUEST_URI}"),
        None => format!("{scheme}://{hostname}{REQUEST_URI}"),
    };

    RedirectConfig {
        ret_code: redirect.status_code.unwrap_or(DEFAULT_REDIRECT_STATUS_CODE),
        uri,
    }
}
