use thiserror::Error;

use crate::{
    apisix::{Var, VarOperator},
    httproutes::{HeaderMatch, HeaderMatchType, PathMatch, PathMatchType, QueryParamMatch, QueryParamMatchType, RouteMatch},
};

const DEFAULT_PATH: &str = "/";
const PREFIX_WILDCARD: &str = "*";
const URI_VARIABLE: &str = "uri";
const HEADER_VARIABLE_PREFIX: &str = "http_";
const QUERY_VARIABLE_PREFIX: &str = "arg_";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("unknown path match type {0}")]
    UnknownPathMatchType(String),
    #[error("unknown header match type {0}")]
    UnknownHeaderMatchType(String),
    #[error("unknown query match type {0}")]
    UnknownQueryMatchType(String),
}

/// Route fields derived from a single `HTTPRouteMatch`.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledMatch {
    pub uri: String,
    pub vars: Vec<Var>,
    pub methods: Vec<String>,
}

impl CompiledMatch {
    /// The match used for rules which declare none: everything under `/`.
    pub fn default_route_match() -> RouteMatch {
        RouteMatch {
            path: Some(PathMatch { r#type: Some(PathMatchType::PathPrefix), value: Some(DEFAULT_PATH.to_owned()) }),
            ..Default::default()
        }
    }

    fn path(path: Option<&PathMatch>) -> Result<(String, Option<Var>), MatchError> {
        let Some(path) = path else {
            return Ok((DEFAULT_PATH.to_owned() + PREFIX_WILDCARD, None));
        };
        let value = path.value.clone().unwrap_or(DEFAULT_PATH.to_owned());
        match path.r#type.as_ref().unwrap_or(&PathMatchType::PathPrefix) {
            PathMatchType::Exact => Ok((value, None)),
            PathMatchType::PathPrefix => Ok((value + PREFIX_WILDCARD, None)),
            PathMatchType::RegularExpression => {
                // uri only has to admit every path, the var does the matching
                Ok((DEFAULT_PATH.to_owned() + PREFIX_WILDCARD, Some(Var::new(URI_VARIABLE, VarOperator::RegexMatch, value))))
            },
            PathMatchType::Unknown(unknown) => Err(MatchError::UnknownPathMatchType(unknown.clone())),
        }
    }

    fn header(header: &HeaderMatch) -> Result<Var, MatchError> {
        let variable = HEADER_VARIABLE_PREFIX.to_owned() + &header.name.to_lowercase().replace('-', "_");
        let operator = match header.r#type.as_ref().unwrap_or(&HeaderMatchType::Exact) {
            HeaderMatchType::Exact => VarOperator::Equal,
            HeaderMatchType::RegularExpression => VarOperator::RegexMatch,
            HeaderMatchType::Unknown(unknown) => return Err(MatchError::UnknownHeaderMatchType(unknown.clone())),
        };
        Ok(Var::new(variable, operator, header.value.clone()))
    }

    fn query(query: &QueryParamMatch) -> Result<Var, MatchError> {
        let variable = QUERY_VARIABLE_PREFIX.to_owned() + &query.name.to_lowercase();
        let operator = match query.r#type.as_ref().unwrap_or(&QueryParamMatchType::Exact) {
            QueryParamMatchType::Exact => VarOperator::Equal,
            QueryParamMatchType::RegularExpression => VarOperator::RegexMatch,
            QueryParamMatchType::Unknown(unknown) => return Err(MatchError::UnknownQueryMatchType(unknown.clone())),
        };
        Ok(Var::new(variable, operator, query.value.clone()))
    }
}

impl TryFrom<&RouteMatch> for CompiledMatch {
    type Error = MatchError;

    fn try_from(route_match: &RouteMatch) -> Result<Self, Self::Error> {
        let (uri, path_var) = Self::path(route_match.path.as_ref())?;

        // the gateway ANDs vars in the listed order: path regex, headers, query params
        let mut vars: Vec<Var> = path_var.into_iter().collect();
        for header in route_match.headers.iter().flatten() {
            vars.push(Self::header(header)?);
        }
        for query in route_match.query_params.iter().flatten() {
            vars.push(Self::query(query)?);
        }

        Ok(CompiledMatch {
            uri,
            vars,
            methods: route_match.method.iter().cloned().collect(),
        })
    }
}
