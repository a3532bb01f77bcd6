//! Job model.
//!
//! A job is one unit of CPU work flowing through the simulated system:
//! it arrives, waits in the ready queue, runs (possibly in several
//! slices under a preemptive discipline), and finishes.
//!
//! # Time Representation
//! All times are in ticks of the external simulator clock, relative to
//! the simulation epoch (t=0). The core owns no clock; every timestamp
//! is handed in by the driver.
//!
//! # Reference
//! Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

use serde::{Deserialize, Serialize};

/// Simulation time, in driver-defined ticks.
pub type Tick = i64;

/// Caller-assigned job identifier, unique within a run.
pub type JobId = u32;

/// Zero-based processing core index.
pub type CoreId = usize;

/// Lifecycle state of a job.
///
/// `Arrived → Running → Finished` for non-preemptive disciplines;
/// preemptive ones cycle `Running ↔ Preempted` until the job's service
/// demand is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// In the ready queue, never run.
    Arrived,
    /// Currently occupying a core.
    Running,
    /// Taken off a core before completion, back in the queue.
    Preempted,
    /// All service demand consumed; record retired.
    Finished,
}

/// A job to be scheduled, with its timing bookkeeping.
///
/// The engine's queue owns every live record from arrival until
/// completion; at completion the timing fields are folded into the run
/// accumulators and the record is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier, assigned by the driver.
    pub id: JobId,
    /// Scheduling priority (lower value = more urgent).
    pub priority: i32,
    /// Total CPU demand in ticks.
    pub service_time: Tick,
    /// Unconsumed CPU demand. Starts equal to `service_time`; the
    /// engine never decrements it; drivers that track execution
    /// progress feed it back via `Scheduler::update_remaining_time`.
    pub remaining_time: Tick,
    /// Time the job entered the system. Globally unique across a run.
    pub arrival_time: Tick,
    /// Time of the first dispatch onto a core. Set exactly once.
    pub first_dispatch: Option<Tick>,
    /// Time of the most recent dispatch (initial or resumed).
    pub last_dispatch: Option<Tick>,
    /// Time the job was most recently taken off a core, or parked in
    /// the queue on arrival. Consumed when the pending idle interval is
    /// folded into `idle_time` at the next dispatch.
    pub last_pause: Option<Tick>,
    /// Accumulated arrived-but-not-running time.
    pub idle_time: Tick,
    /// Lifecycle state.
    pub state: JobState,
}

impl Job {
    /// Creates a freshly arrived job with its full service demand ahead.
    pub fn new(id: JobId, arrival_time: Tick, service_time: Tick, priority: i32) -> Self {
        Self {
            id,
            priority,
            service_time,
            remaining_time: service_time,
            arrival_time,
            first_dispatch: None,
            last_dispatch: None,
            last_pause: None,
            idle_time: 0,
            state: JobState::Arrived,
        }
    }

    /// Places the job on a core at `now`.
    ///
    /// Records the first dispatch if this is one, folds any pending
    /// pause interval into `idle_time`, and moves the job to `Running`.
    pub fn dispatch(&mut self, now: Tick) {
        if self.first_dispatch.is_none() {
            self.first_dispatch = Some(now);
        }
        if let Some(paused_at) = self.last_pause.take() {
            self.idle_time += now - paused_at;
        }
        self.last_dispatch = Some(now);
        self.state = JobState::Running;
    }

    /// Takes the job off its core at `now`, returning it to the queue.
    pub fn pause(&mut self, now: Tick) {
        self.last_pause = Some(now);
        self.state = JobState::Preempted;
    }

    /// Time from arrival to `now`.
    pub fn turnaround(&self, now: Tick) -> Tick {
        now - self.arrival_time
    }

    /// Time from arrival to first dispatch, once the job has run.
    pub fn response(&self) -> Option<Tick> {
        self.first_dispatch.map(|t| t - self.arrival_time)
    }
}
