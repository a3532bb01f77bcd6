//! Discrete-event CPU-scheduling simulator core.
//!
//! Given a stream of arrival, completion, and quantum-expiry events,
//! delivered by an external driver in increasing simulation time, this
//! crate decides which job should occupy a processing core under one of
//! six classical disciplines (FCFS, SJF, PSJF, PRI, PPRI, RR) and
//! accumulates waiting, turnaround, and response statistics. It owns no
//! clock and performs no I/O; the driving harness, core-assignment
//! table, and quantum timer all live on the caller's side.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `JobState`, `Policy`
//! - **`queue`**: `OrderedQueue`, a stable ordered sequence under an
//!   injected `QueueOrder` relation
//! - **`engine`**: `Scheduler`, the event-driven policy engine, and its
//!   `RunMetrics`/`RunSummary` accounting
//! - **`config`**: `SimConfig`, the serde-backed run description
//! - **`error`**: `SchedulerError` fail-fast contract violations
//!
//! # Usage
//!
//! ```
//! use std::num::NonZeroUsize;
//! use simsched::{Policy, Scheduler};
//!
//! let mut scheduler = Scheduler::new(NonZeroUsize::new(1).unwrap(), Policy::Fcfs);
//! assert_eq!(scheduler.job_arrived(1, 0, 5, 0).unwrap(), Some(0));
//! assert_eq!(scheduler.job_arrived(2, 2, 3, 0).unwrap(), None);
//! assert_eq!(scheduler.job_finished(0, 1, 5).unwrap(), Some(2));
//! assert_eq!(scheduler.job_finished(0, 2, 8).unwrap(), None);
//! assert_eq!(scheduler.average_waiting_time().unwrap(), 1.5);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod queue;

pub use config::SimConfig;
pub use engine::{RunMetrics, RunSummary, Scheduler};
pub use error::{SchedResult, SchedulerError};
pub use models::{CoreId, Job, JobId, JobState, Policy, Tick};
pub use queue::{OrderedQueue, QueueOrder};
