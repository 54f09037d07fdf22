//! Scripted in-memory cluster for service tests
//!
//! Timing is relative to the moment the deletion is accepted and uses tokio's
//! clock, so tests running with `start_paused = true` are deterministic.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GroupLabels, Instance, InstancePhase, ReadinessState, TargetRef};
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::ApplicationError;
use crate::ports::ClusterControlPort;

/// Number of calls per port operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub get: usize,
    pub delete: usize,
    pub list: usize,
}

#[derive(Debug, Default)]
struct State {
    deleted_at: Option<Instant>,
    calls: Calls,
    list_times: Vec<Instant>,
}

#[derive(Debug)]
pub struct ScriptedCluster {
    target: Instance,
    exists: bool,
    vanishes_after: Option<Duration>,
    delete_rejection: Option<(Option<u16>, String)>,
    get_failure_after_delete: Option<(Option<u16>, String)>,
    successor: Option<(Instance, Duration)>,
    failing_lists: usize,
    state: Mutex<State>,
}

pub fn running(containers: usize) -> ReadinessState {
    ReadinessState::new(InstancePhase::Running, vec![true; containers])
}

pub fn target_instance(labels: GroupLabels) -> Instance {
    Instance::new("default", "web-1")
        .with_uid("uid-original")
        .with_labels(labels)
        .with_readiness(running(1))
}

pub fn target_ref() -> TargetRef {
    TargetRef::new("default", "web-1").unwrap()
}

impl ScriptedCluster {
    /// Target exists and vanishes as soon as it is deleted
    pub fn new(target: Instance) -> Self {
        Self {
            target,
            exists: true,
            vanishes_after: Some(Duration::ZERO),
            delete_rejection: None,
            get_failure_after_delete: None,
            successor: None,
            failing_lists: 0,
            state: Mutex::new(State::default()),
        }
    }

    pub fn missing(mut self) -> Self {
        self.exists = false;
        self
    }

    pub fn never_vanishes(mut self) -> Self {
        self.vanishes_after = None;
        self
    }

    pub fn vanishes_after(mut self, after: Duration) -> Self {
        self.vanishes_after = Some(after);
        self
    }

    pub fn rejects_delete(mut self, status: Option<u16>, reason: &str) -> Self {
        self.delete_rejection = Some((status, reason.to_string()));
        self
    }

    pub fn get_fails_after_delete(mut self, status: Option<u16>, reason: &str) -> Self {
        self.get_failure_after_delete = Some((status, reason.to_string()));
        self
    }

    /// A successor appears (pending) right after deletion and is ready after `after`
    pub fn successor_ready_after(mut self, successor: Instance, after: Duration) -> Self {
        self.successor = Some((successor, after));
        self
    }

    pub fn failing_lists(mut self, count: usize) -> Self {
        self.failing_lists = count;
        self
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().calls
    }

    pub fn list_times(&self) -> Vec<Instant> {
        self.state.lock().list_times.clone()
    }

    fn since_delete(&self) -> Option<Duration> {
        self.state.lock().deleted_at.map(|at| at.elapsed())
    }

    fn target_present(&self) -> bool {
        if !self.exists {
            return false;
        }
        match (self.since_delete(), self.vanishes_after) {
            (Some(elapsed), Some(vanish)) => elapsed < vanish,
            _ => true,
        }
    }

    fn successor_now(&self) -> Option<Instance> {
        let elapsed = self.since_delete()?;
        let (successor, ready_after) = self.successor.as_ref()?;
        let readiness = if elapsed >= *ready_after {
            running(successor.readiness.container_ready.len().max(1))
        } else {
            ReadinessState::new(InstancePhase::Pending, vec![false])
        };
        Some(successor.clone().with_readiness(readiness))
    }
}

#[async_trait]
impl ClusterControlPort for ScriptedCluster {
    async fn get_instance(&self, target: &TargetRef) -> Result<Instance, ApplicationError> {
        self.state.lock().calls.get += 1;

        if self.since_delete().is_some() {
            if let Some((status, reason)) = &self.get_failure_after_delete {
                return Err(ApplicationError::control_interface(*status, reason.clone()));
            }
        }

        if self.target_present() {
            Ok(self.target.clone())
        } else {
            Err(ApplicationError::not_found(target))
        }
    }

    async fn delete_instance(&self, target: &TargetRef) -> Result<(), ApplicationError> {
        self.state.lock().calls.delete += 1;

        if let Some((status, reason)) = &self.delete_rejection {
            return Err(ApplicationError::control_interface(*status, reason.clone()));
        }
        if !self.target_present() {
            return Err(ApplicationError::control_interface(
                Some(404),
                format!("pods \"{}\" not found", target.name()),
            ));
        }

        let mut state = self.state.lock();
        if state.deleted_at.is_none() {
            state.deleted_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn list_instances(
        &self,
        _namespace: &str,
        selector: &GroupLabels,
    ) -> Result<Vec<Instance>, ApplicationError> {
        let call = {
            let mut state = self.state.lock();
            state.calls.list += 1;
            state.list_times.push(Instant::now());
            state.calls.list
        };

        if call <= self.failing_lists {
            return Err(ApplicationError::control_interface(
                Some(503),
                "Service Unavailable",
            ));
        }

        let mut instances = Vec::new();
        if self.target_present() {
            instances.push(self.target.clone());
        }
        if let Some(successor) = self.successor_now() {
            instances.push(successor);
        }

        Ok(instances
            .into_iter()
            .filter(|instance| selector.matches(&instance.labels))
            .collect())
    }
}
