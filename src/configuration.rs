use serde::Deserialize;
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::{apisix::ResolveGranularity, Result};

#[derive(Debug, TypedBuilder, Deserialize)]
pub struct Configuration {
    #[builder(setter(into))]
    pub controller_name: String,
    #[serde(default)]
    #[builder(default)]
    pub resolve_granularity: ResolveGranularity,
    #[serde(default)]
    #[builder(default, setter(strip_option, into))]
    pub log_file: Option<String>,
}

#[derive(Error, Debug)]
enum ConfigurationError {
    #[error("controller name must be not empty")]
    ControllerName,
    #[error("log file must be not empty")]
    LogFile,
}

impl Configuration {
    pub fn validate(&self) -> Result<()> {
        if self.controller_name.is_empty() {
            return Err(ConfigurationError::ControllerName.into());
        }
        match self.log_file.as_deref() {
            Some("") => Err(ConfigurationError::LogFile.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use crate::apisix::ResolveGranularity;

    #[test]
    pub fn test_configuration_defaults() {
        let configuration: Configuration = serde_yaml::from_str("controller_name: apisix-ingress-controller").unwrap();
        assert_eq!(configuration.resolve_granularity, ResolveGranularity::Endpoint);
        assert!(configuration.log_file.is_none());
        assert!(configuration.validate().is_ok());
    }

    #[test]
    pub fn test_configuration_from_file() {
        let m = r"
controller_name: apisix-ingress-controller
resolve_granularity: service
log_file: /var/log/apisix-translator.log
";
        let configuration: Configuration = serde_yaml::from_str(m).unwrap();
        assert_eq!(configuration.resolve_granularity, ResolveGranularity::Service);
        assert_eq!(configuration.log_file.as_deref(), Some("/var/log/apisix-translator.log"));
    }

    #[test]
    pub fn test_configuration_validation() {
        let configuration = Configuration::builder().controller_name("").build();
        assert_eq!(configuration.validate().unwrap_err().to_string(), "controller name must be not empty");

        let configuration = Configuration::builder().controller_name("translator").log_file("").build();
        assert!(configuration.validate().is_err());
    }
}
