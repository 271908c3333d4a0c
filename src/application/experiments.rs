//! A/B experiment variant assignment and exposure tracking
//!
//! Assignment is deterministic: the same subject always lands in the
//! same variant for a given experiment, with no stored state. Exposures
//! are published on the event bus for analytics subscribers.

use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::events::SharedEventBus;
use crate::domain::events::{DomainEvent, ExperimentExposureEvent};
use crate::shared::{DomainError, DomainResult};

/// A variant with a relative weight (weights need not sum to any
/// particular total).
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub weight: u32,
}

#[derive(Debug, Clone)]
pub struct Experiment {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl Experiment {
    pub fn new(name: impl Into<String>, variants: Vec<(&str, u32)>) -> Self {
        Self {
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(name, weight)| Variant {
                    name: name.to_string(),
                    weight,
                })
                .collect(),
        }
    }
}

pub struct ExperimentProvider {
    experiments: Vec<Experiment>,
    event_bus: SharedEventBus,
}

impl ExperimentProvider {
    pub fn new(experiments: Vec<Experiment>, event_bus: SharedEventBus) -> Self {
        Self {
            experiments,
            event_bus,
        }
    }

    /// Assign a subject to a variant. Stable across calls: buckets are
    /// derived from sha256(experiment name, subject id) over the total
    /// variant weight.
    pub fn assign(&self, experiment_name: &str, subject_id: Uuid) -> DomainResult<&Variant> {
        let experiment = self
            .experiments
            .iter()
            .find(|e| e.name == experiment_name)
            .ok_or_else(|| DomainError::not_found("experiment", "name", experiment_name))?;

        let total: u32 = experiment.variants.iter().map(|v| v.weight).sum();
        if total == 0 {
            return Err(DomainError::Validation(format!(
                "experiment '{}' has no weighted variants",
                experiment_name
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(experiment.name.as_bytes());
        hasher.update(subject_id.as_bytes());
        let digest = hasher.finalize();
        let bucket = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) % total;

        let mut cumulative = 0;
        for variant in &experiment.variants {
            cumulative += variant.weight;
            if bucket < cumulative {
                return Ok(variant);
            }
        }
        // Unreachable: bucket < total == final cumulative.
        Ok(experiment.variants.last().unwrap())
    }

    /// Assign and publish an exposure event for analytics.
    pub fn assign_and_track(
        &self,
        experiment_name: &str,
        subject_id: Uuid,
    ) -> DomainResult<String> {
        let variant = self.assign(experiment_name, subject_id)?.name.clone();
        self.event_bus
            .publish(DomainEvent::ExperimentExposure(ExperimentExposureEvent {
                experiment: experiment_name.to_string(),
                variant: variant.clone(),
                subject_id,
                timestamp: Utc::now(),
            }));
        Ok(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::create_event_bus;
    use std::time::Duration;

    fn provider() -> ExperimentProvider {
        ExperimentProvider::new(
            vec![Experiment::new(
                "pricing-page",
                vec![("control", 50), ("treatment", 50)],
            )],
            create_event_bus(),
        )
    }

    #[test]
    fn assignment_is_deterministic() {
        let provider = provider();
        let subject = Uuid::new_v4();
        let first = provider.assign("pricing-page", subject).unwrap().name.clone();
        for _ in 0..10 {
            assert_eq!(provider.assign("pricing-page", subject).unwrap().name, first);
        }
    }

    #[test]
    fn both_variants_are_reachable() {
        let provider = provider();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let variant = provider.assign("pricing-page", Uuid::new_v4()).unwrap();
            seen.insert(variant.name.clone());
        }
        assert!(seen.contains("control"));
        assert!(seen.contains("treatment"));
    }

    #[test]
    fn unknown_experiment_is_not_found() {
        let provider = provider();
        let err = provider.assign("missing", Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn tracking_publishes_exposure_event() {
        let bus = create_event_bus();
        let provider = ExperimentProvider::new(
            vec![Experiment::new("pricing-page", vec![("control", 1)])],
            bus.clone(),
        );
        let mut subscriber = bus.subscribe();

        let subject = Uuid::new_v4();
        let variant = provider.assign_and_track("pricing-page", subject).unwrap();
        assert_eq!(variant, "control");

        let received = tokio::time::timeout(Duration::from_millis(100), subscriber.recv())
            .await
            .expect("timeout")
            .expect("no message");
        match received.event {
            DomainEvent::ExperimentExposure(e) => {
                assert_eq!(e.experiment, "pricing-page");
                assert_eq!(e.variant, "control");
                assert_eq!(e.subject_id, subject);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
