use super::{AuthGateway, Identity, SubmitPurpose};
use crate::config::{EndpointProfile, GatewayConfig, WeightedFailure};
use crate::error::GatewayError;
use crate::role::Role;
use crate::sanitize::SanitizedRecord;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

struct Endpoint {
    latency: Duration,
    failures: Vec<WeightedFailure>,
}

impl From<&EndpointProfile> for Endpoint {
    fn from(profile: &EndpointProfile) -> Self {
        Self {
            latency: Duration::from_millis(profile.latency_ms),
            failures: profile.failures.clone(),
        }
    }
}

/// Stand-in endpoint: waits a fixed latency, then fails with one of the
/// configured reasons according to their weights, or succeeds.
pub struct SimulatedGateway {
    registration: Endpoint,
    login: Endpoint,
    rng: Mutex<StdRng>,
}

impl SimulatedGateway {
    /// Registration plus the login endpoint of `role`.
    pub fn from_config(config: &GatewayConfig, role: Role) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            registration: Endpoint::from(&config.registration),
            login: Endpoint::from(config.login(role)),
            rng: Mutex::new(rng),
        }
    }

    async fn call(
        &self,
        purpose: SubmitPurpose,
        record: SanitizedRecord,
    ) -> Result<Identity, GatewayError> {
        debug!(?purpose, fields = record.len(), "simulated endpoint call");
        let endpoint = match purpose {
            SubmitPurpose::Register => &self.registration,
            SubmitPurpose::Login => &self.login,
        };
        if !endpoint.latency.is_zero() {
            tokio::time::sleep(endpoint.latency).await;
        }

        let (roll, token) = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            (rng.random::<f64>(), rng.random::<u32>())
        };

        if let Some(reason) = pick_failure(&endpoint.failures, roll) {
            warn!(?purpose, %reason, "simulated endpoint rejected the request");
            return Err(reason);
        }

        let email = record.get_str("email").map(str::to_string);
        Ok(Identity::new(format!("usr_{token:08x}"), email))
    }
}

fn pick_failure(failures: &[WeightedFailure], roll: f64) -> Option<GatewayError> {
    let mut threshold = 0.0;
    for failure in failures {
        threshold += failure.weight;
        if roll < threshold {
            return Some(failure.reason);
        }
    }
    None
}

#[async_trait]
impl AuthGateway for SimulatedGateway {
    async fn register(&self, record: SanitizedRecord) -> Result<Identity, GatewayError> {
        self.call(SubmitPurpose::Register, record).await
    }

    async fn login(&self, record: SanitizedRecord) -> Result<Identity, GatewayError> {
        self.call(SubmitPurpose::Login, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(reason: GatewayError, weight: f64) -> WeightedFailure {
        WeightedFailure::new(reason, weight)
    }

    fn instant_config() -> GatewayConfig {
        GatewayConfig {
            seed: Some(7),
            registration: EndpointProfile::default(),
            provider_login: EndpointProfile::default(),
            patient_login: EndpointProfile::default(),
        }
    }

    #[test]
    fn failures_are_picked_by_cumulative_weight() {
        let table = [
            weighted(GatewayError::EmailTaken, 0.10),
            weighted(GatewayError::LicenseTaken, 0.05),
            weighted(GatewayError::Network, 0.05),
        ];
        assert_eq!(pick_failure(&table, 0.05), Some(GatewayError::EmailTaken));
        assert_eq!(pick_failure(&table, 0.12), Some(GatewayError::LicenseTaken));
        assert_eq!(pick_failure(&table, 0.18), Some(GatewayError::Network));
        assert_eq!(pick_failure(&table, 0.20), None);
        assert_eq!(pick_failure(&[], 0.0), None);
    }

    #[tokio::test]
    async fn certain_failure_is_reported() {
        let mut config = instant_config();
        config.registration.failures = vec![weighted(GatewayError::EmailTaken, 1.0)];
        let gateway = SimulatedGateway::from_config(&config, Role::Provider);

        let result = gateway.register(SanitizedRecord::default()).await;
        assert_eq!(result, Err(GatewayError::EmailTaken));
        assert!(gateway.login(SanitizedRecord::default()).await.is_ok());
    }

    #[tokio::test]
    async fn login_table_follows_role() {
        let mut config = instant_config();
        config.provider_login.failures = vec![weighted(GatewayError::AccountLocked, 1.0)];

        let provider = SimulatedGateway::from_config(&config, Role::Provider);
        let patient = SimulatedGateway::from_config(&config, Role::Patient);
        assert_eq!(
            provider.login(SanitizedRecord::default()).await,
            Err(GatewayError::AccountLocked)
        );
        assert!(patient.login(SanitizedRecord::default()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn default_patient_login_always_succeeds_after_a_second() {
        let config = GatewayConfig {
            seed: Some(11),
            ..GatewayConfig::default()
        };
        let gateway = SimulatedGateway::from_config(&config, Role::Patient);

        for _ in 0..200 {
            let started = tokio::time::Instant::now();
            let result = gateway.login(SanitizedRecord::default()).await;
            assert!(result.is_ok(), "patient login rejected: {result:?}");
            assert!(started.elapsed() >= Duration::from_millis(1_000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_awaited() {
        let mut config = instant_config();
        config.registration.latency_ms = 2_000;
        let gateway = SimulatedGateway::from_config(&config, Role::Provider);

        let started = tokio::time::Instant::now();
        let identity = gateway
            .register(SanitizedRecord::default())
            .await
            .expect("no failures configured");
        assert!(started.elapsed() >= Duration::from_millis(2_000));
        assert!(identity.id.starts_with("usr_"));
    }
}
