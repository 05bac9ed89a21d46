use super::{FilterType, HTTPRoute, HTTPRouteRule, HeaderMatchType, PathMatchType, RouteMatch};

#[test]
pub fn test_rule_matcher() {
    let m = r"
path:
  type: PathPrefix
  value: /v2
headers:
- name: version
  value: two
queryParams:
- type: RegularExpression
  name: page
  value: '[0-9]+'
method: GET
";
    let x: RouteMatch = serde_yaml::from_str(m).unwrap();
    let path = x.path.unwrap();
    assert_eq!(path.r#type, Some(PathMatchType::PathPrefix));
    assert_eq!(path.value.as_deref(), Some("/v2"));
    let headers = x.headers.unwrap();
    assert_eq!(headers[0].r#type, None);
    assert_eq!(headers[0].name, "version");
    assert_eq!(x.query_params.unwrap()[0].name, "page");
    assert_eq!(x.method.as_deref(), Some("GET"));
}

#[test]
pub fn test_unknown_types_are_kept() {
    let m = r"
matches:
  - path:
      type: Glob
      value: /v2/*
    headers:
    - type: Prefix
      name: version
      value: t
filters:
  - type: CORS
  - type: RequestMirror
    requestMirror:
      backendRef:
        name: mirror
        port: 80
backendRefs:
  - name: infra-backend-v2
    port: 8080
";
    let x: HTTPRouteRule = serde_yaml::from_str(m).unwrap();
    let matches = x.matches.unwrap();
    assert_eq!(matches[0].path.as_ref().and_then(|p| p.r#type.clone()), Some(PathMatchType::Unknown("Glob".to_owned())));
    assert_eq!(matches[0].headers.as_ref().unwrap()[0].r#type, Some(HeaderMatchType::Unknown("Prefix".to_owned())));
    let filters = x.filters.unwrap();
    assert_eq!(filters[0].r#type, FilterType::Unknown("CORS".to_owned()));
    assert_eq!(filters[1].r#type, FilterType::RequestMirror);
    assert_eq!(filters[1].request_mirror.as_ref().unwrap().backend_ref.name, "mirror");
}

#[test]
pub fn test_types_serialize_back_to_wire_names() {
    assert_eq!(serde_json::to_string(&PathMatchType::RegularExpression).unwrap(), "\"RegularExpression\"");
    assert_eq!(serde_json::to_string(&FilterType::URLRewrite).unwrap(), "\"URLRewrite\"");
    assert_eq!(serde_json::to_string(&FilterType::Unknown("CORS".to_owned())).unwrap(), "\"CORS\"");
    assert_eq!(PathMatchType::from("Exact"), PathMatchType::Exact);
}

#[test]
pub fn test_http_route() {
    let m = r"
apiVersion: gateway.networking.k8s.io/v1
kind: HTTPRoute
metadata:
  name: matching-part1
  namespace: gateway-conformance-infra
spec:
  parentRefs:
  - name: same-namespace
  hostnames:
  - example.com
  - example.net
  rules:
  - matches:
    - path:
        type: PathPrefix
        value: /
      headers:
      - name: version
        value: one
    - headers:
      - name: version
        value: one
    filters:
    - type: RequestHeaderModifier
      requestHeaderModifier:
        set:
        - name: X-Env
          value: prod
        remove:
        - X-Debug
    backendRefs:
    - name: infra-backend-v1
      port: 8080
      weight: 3
  - matches:
    - path:
        type: Exact
        value: blah
    backendRefs:
    - name: infra-backend-v2
      port: 8080
";
    let x: HTTPRoute = serde_yaml::from_str(m).unwrap();
    assert_eq!(x.spec.hostnames.as_ref().unwrap(), &vec!["example.com".to_owned(), "example.net".to_owned()]);
    assert_eq!(x.spec.parent_refs.as_ref().unwrap()[0].name, "same-namespace");
    let rules = x.spec.rules.unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].matches.as_ref().unwrap().len(), 2);
    let modifier = rules[0].filters.as_ref().unwrap()[0].request_header_modifier.as_ref().unwrap();
    assert_eq!(modifier.set.as_ref().unwrap()[0].name, "X-Env");
    assert_eq!(modifier.remove.as_ref().unwrap(), &vec!["X-Debug".to_owned()]);
    assert_eq!(rules[0].backend_refs.as_ref().unwrap()[0].weight, Some(3));
    assert_eq!(rules[1].backend_refs.as_ref().unwrap()[0].weight, None);
}
