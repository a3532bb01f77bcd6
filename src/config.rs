//! Run configuration.
//!
//! A small serde-backed description of one simulation run (core count
//! and discipline) that drivers deserialize from their own
//! configuration source and hand to [`Scheduler::from_config`].
//!
//! [`Scheduler::from_config`]: crate::engine::Scheduler::from_config

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::models::Policy;

/// Configuration for one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of processing cores, at least one.
    pub cores: NonZeroUsize,
    /// The scheduling discipline for the run.
    pub policy: Policy,
}

impl Default for SimConfig {
    /// One core under first-come first-served.
    fn default() -> Self {
        Self {
            cores: NonZeroUsize::MIN,
            policy: Policy::Fcfs,
        }
    }
}
