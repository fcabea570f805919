use crate::error::{ConfigError, GatewayError};
use crate::role::Role;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeightedFailure {
    pub reason: GatewayError,
    pub weight: f64,
}

impl WeightedFailure {
    pub fn new(reason: GatewayError, weight: f64) -> Self {
        Self { reason, weight }
    }
}

/// Latency and failure table of one simulated endpoint. Keys left out of a
/// profile written in the config file mean no wait and no failures.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EndpointProfile {
    pub latency_ms: u64,
    pub failures: Vec<WeightedFailure>,
}

impl EndpointProfile {
    pub fn new(latency_ms: u64, failures: Vec<WeightedFailure>) -> Self {
        Self {
            latency_ms,
            failures,
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        let total: f64 = self.failures.iter().map(|failure| failure.weight).sum();
        let negative = self.failures.iter().any(|failure| failure.weight < 0.0);
        if negative || total > 1.0 + f64::EPSILON {
            return Err(ConfigError::InvalidWeights { total });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub seed: Option<u64>,
    pub registration: EndpointProfile,
    pub provider_login: EndpointProfile,
    pub patient_login: EndpointProfile,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            seed: None,
            registration: EndpointProfile::new(
                2_000,
                vec![
                    WeightedFailure::new(GatewayError::EmailTaken, 0.10),
                    WeightedFailure::new(GatewayError::LicenseTaken, 0.05),
                    WeightedFailure::new(GatewayError::Network, 0.05),
                ],
            ),
            provider_login: EndpointProfile::new(
                2_000,
                vec![
                    WeightedFailure::new(GatewayError::InvalidCredentials, 0.10),
                    WeightedFailure::new(GatewayError::AccountNotFound, 0.05),
                    WeightedFailure::new(GatewayError::AccountLocked, 0.05),
                    WeightedFailure::new(GatewayError::Network, 0.05),
                ],
            ),
            patient_login: EndpointProfile::new(1_000, Vec::new()),
        }
    }
}

impl GatewayConfig {
    /// The login endpoint a role signs in against.
    pub fn login(&self, role: Role) -> &EndpointProfile {
        match role {
            Role::Patient => &self.patient_login,
            Role::Provider => &self.provider_login,
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.registration.check()?;
        self.provider_login.check()?;
        self.patient_login.check()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.gateway.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_yaml_str("{}").expect("config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.gateway.registration.latency_ms, 2_000);
        assert_eq!(config.gateway.registration.failures.len(), 3);
        assert_eq!(config.gateway.provider_login.failures.len(), 4);
    }

    #[test]
    fn patient_login_waits_a_second_and_never_fails_by_default() {
        let gateway = GatewayConfig::default();
        let patient = gateway.login(Role::Patient);
        assert_eq!(patient.latency_ms, 1_000);
        assert!(patient.failures.is_empty());
        assert_eq!(gateway.login(Role::Provider).latency_ms, 2_000);
    }

    #[test]
    fn partial_gateway_section_keeps_other_defaults() {
        let yaml = r#"
gateway:
  seed: 42
  registration:
    latency_ms: 10
    failures:
      - reason: email_taken
        weight: 0.5
"#;
        let config = AppConfig::from_yaml_str(yaml).expect("config");
        assert_eq!(config.gateway.seed, Some(42));
        let email_taken = WeightedFailure::new(GatewayError::EmailTaken, 0.5);
        assert_eq!(
            config.gateway.registration,
            EndpointProfile::new(10, vec![email_taken])
        );
        assert_eq!(config.gateway.provider_login.failures.len(), 4);
        assert_eq!(config.gateway.patient_login.latency_ms, 1_000);
    }

    #[test]
    fn overweight_table_is_rejected() {
        let yaml = r#"
gateway:
  patient_login:
    failures:
      - { reason: network, weight: 0.8 }
      - { reason: account_locked, weight: 0.4 }
"#;
        let err = AppConfig::from_yaml_str(yaml).expect_err("weights exceed 1.0");
        assert!(matches!(err, ConfigError::InvalidWeights { .. }));
    }

    #[test]
    fn unknown_reason_is_a_yaml_error() {
        let yaml = r#"
gateway:
  provider_login:
    failures:
      - { reason: meteor, weight: 0.1 }
"#;
        let err = AppConfig::from_yaml_str(yaml).expect_err("unknown reason");
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/definitely/not/here.yaml")).expect_err("missing");
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
