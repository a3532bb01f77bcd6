//! Event-driven scheduling engine.
//!
//! Translates job lifecycle events (arrival, completion, quantum
//! expiry) into dispatch decisions under one of the six classical
//! disciplines. The engine owns the ready queue and the run
//! accumulators; the external driver owns the clock, the core
//! assignment table, and the delivery of events in non-decreasing
//! simulation time, one at a time.
//!
//! # Decision Protocol
//!
//! - An arrival answers `Some(0)` when the new job should start running
//!   (the driver remaps core 0 to its lowest-numbered idle core), or
//!   `None` when nothing changes.
//! - A completion answers the id of the job that should take over the
//!   freed core, or `None` to idle it.
//! - A quantum expiry (round-robin only) answers the id of the job
//!   holding the core for the next slice.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

mod metrics;

pub use metrics::{RunMetrics, RunSummary};

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use log::{debug, trace};

use crate::config::SimConfig;
use crate::error::{SchedResult, SchedulerError};
use crate::models::{CoreId, Job, JobId, JobState, Policy, Tick};
use crate::queue::OrderedQueue;

/// One scheduling run: a policy, its ready queue, and run accumulators.
///
/// Each instance is an independent simulation; nothing is shared
/// between instances. Single-threaded by contract: the driver delivers
/// events sequentially.
#[derive(Debug)]
pub struct Scheduler {
    policy: Policy,
    cores: NonZeroUsize,
    queue: OrderedQueue<Job, Policy>,
    metrics: RunMetrics,
    last_arrival: Option<Tick>,
}

impl Scheduler {
    /// Starts a run with `cores` processing cores under `policy`.
    ///
    /// Accumulators start at zero; the queue's ordering relation is the
    /// policy's and never changes for the lifetime of the engine.
    pub fn new(cores: NonZeroUsize, policy: Policy) -> Self {
        debug!("scheduler up: {cores} core(s), {policy}");
        Self {
            policy,
            cores,
            queue: OrderedQueue::new(policy),
            metrics: RunMetrics::new(),
            last_arrival: None,
        }
    }

    /// Starts a run from a deserialized [`SimConfig`].
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.cores, config.policy)
    }

    /// The active discipline.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The configured core count.
    pub fn cores(&self) -> NonZeroUsize {
        self.cores
    }

    /// Number of live (queued or running) jobs.
    pub fn queued_jobs(&self) -> usize {
        self.queue.len()
    }

    /// Live jobs in queue order, head first. Boundary-side
    /// observability: drivers dump this instead of the engine printing.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.queue.iter()
    }

    /// Handles a job arrival and decides whether it starts running.
    ///
    /// Returns `Some(0)` when the job should be dispatched (empty
    /// system, or a preemptive win over the running job) and `None`
    /// when it waits its turn.
    pub fn job_arrived(
        &mut self,
        job_id: JobId,
        time: Tick,
        service_time: Tick,
        priority: i32,
    ) -> SchedResult<Option<CoreId>> {
        if let Some(previous) = self.last_arrival {
            if time <= previous {
                return Err(SchedulerError::ArrivalOutOfOrder { time, previous });
            }
        }
        if service_time <= 0 {
            return Err(SchedulerError::InvalidServiceTime {
                job: job_id,
                service_time,
            });
        }
        if self.queue.iter().any(|j| j.id == job_id) {
            return Err(SchedulerError::DuplicateJobId(job_id));
        }
        self.last_arrival = Some(time);

        let mut job = Job::new(job_id, time, service_time, priority);
        let dispatched = match self.policy {
            Policy::Fcfs | Policy::Sjf | Policy::Pri => {
                let was_empty = self.queue.is_empty();
                if was_empty {
                    job.dispatch(time);
                }
                self.queue.insert(job);
                was_empty
            }
            Policy::Psjf | Policy::Ppri => {
                let wins = match self.queue.peek() {
                    None => true,
                    Some(running) => self.policy.compare(&job, running) == Ordering::Less,
                };
                if wins {
                    if let Some(running) = self.queue.peek_mut() {
                        trace!("job {} preempted by job {job_id} at t={time}", running.id);
                        running.pause(time);
                    }
                    job.dispatch(time);
                } else {
                    job.last_pause = Some(time);
                }
                self.queue.insert(job);
                wins
            }
            Policy::Rr => {
                let was_empty = self.queue.is_empty();
                if was_empty {
                    job.dispatch(time);
                } else {
                    job.last_pause = Some(time);
                }
                self.queue.insert(job);
                was_empty
            }
        };

        if dispatched {
            debug!("job {job_id} arrived at t={time}, dispatched");
            Ok(Some(0))
        } else {
            trace!("job {job_id} arrived at t={time}, queued");
            Ok(None)
        }
    }

    /// Retires a completed job and decides who takes the freed core.
    ///
    /// Folds the job's timings into the run accumulators, then answers
    /// the id of the next job to run, or `None` to idle the core.
    pub fn job_finished(
        &mut self,
        core_id: CoreId,
        job_id: JobId,
        time: Tick,
    ) -> SchedResult<Option<JobId>> {
        self.check_core(core_id)?;

        // FCFS/PSJF/RR keep the running job at the head; under the
        // others a more urgent later arrival may sit in front of it, so
        // the finished job is located by id.
        let index = if self.policy.completes_at_head() {
            let head = self.queue.peek().map(|j| j.id);
            if head != Some(job_id) {
                return Err(SchedulerError::JobNotAtHead { job: job_id, head });
            }
            0
        } else {
            self.queue
                .iter()
                .position(|j| j.id == job_id)
                .ok_or(SchedulerError::UnknownJob(job_id))?
        };

        let (waiting, turnaround, response) = {
            let Some(job) = self.queue.at(index) else {
                return Err(SchedulerError::UnknownJob(job_id));
            };
            let Some(response) = job.response() else {
                return Err(SchedulerError::NeverDispatched(job_id));
            };
            let waiting = if self.policy.is_preemptive() {
                job.idle_time
            } else {
                // Never paused once started: waiting equals response.
                response
            };
            (waiting, job.turnaround(time), response)
        };

        if let Some(mut finished) = self.queue.remove_at(index) {
            finished.state = JobState::Finished;
            trace!("job {job_id} retired at t={time}");
        }
        self.metrics.record_completion(waiting, turnaround, response);

        Ok(self.dispatch_head(core_id, time))
    }

    /// Handles a round-robin quantum expiry on `core_id`.
    ///
    /// With more than one job queued the head rotates to the tail and
    /// the next job takes the core; a lone job keeps it. Errors with
    /// [`SchedulerError::QuantumNotApplicable`] under any other policy.
    pub fn quantum_expired(&mut self, core_id: CoreId, time: Tick) -> SchedResult<Option<JobId>> {
        self.check_core(core_id)?;
        if self.policy != Policy::Rr {
            return Err(SchedulerError::QuantumNotApplicable(self.policy));
        }
        if self.queue.is_empty() {
            return Ok(None);
        }

        if self.queue.len() > 1 {
            if let Some(mut rotated) = self.queue.poll() {
                rotated.pause(time);
                trace!("job {} rotated to the tail at t={time}", rotated.id);
                self.queue.insert(rotated);
            }
        }

        Ok(self.dispatch_head(core_id, time))
    }

    /// Records driver-tracked execution progress for the running job.
    ///
    /// `remaining_time` is an input-managed field: the engine never
    /// decrements it on its own. Preemptive shortest-job-first drivers
    /// call this before delivering an arrival so the preemption
    /// comparison sees current remaining demand. Restricted to the
    /// queue head, where a shrinking key cannot break the sort order.
    pub fn update_remaining_time(&mut self, job_id: JobId, remaining: Tick) -> SchedResult<()> {
        match self.queue.peek_mut() {
            Some(head) if head.id == job_id => {
                head.remaining_time = remaining;
                Ok(())
            }
            head => Err(SchedulerError::JobNotAtHead {
                job: job_id,
                head: head.map(|j| j.id),
            }),
        }
    }

    /// Mean waiting time over completed jobs.
    ///
    /// Meaningful once the run has drained; errors with
    /// [`SchedulerError::NoCompletedJobs`] before the first completion.
    pub fn average_waiting_time(&self) -> SchedResult<f64> {
        self.metrics
            .average_waiting()
            .ok_or(SchedulerError::NoCompletedJobs)
    }

    /// Mean turnaround time over completed jobs.
    pub fn average_turnaround_time(&self) -> SchedResult<f64> {
        self.metrics
            .average_turnaround()
            .ok_or(SchedulerError::NoCompletedJobs)
    }

    /// Mean response time over completed jobs.
    pub fn average_response_time(&self) -> SchedResult<f64> {
        self.metrics
            .average_response()
            .ok_or(SchedulerError::NoCompletedJobs)
    }

    /// Ends the run, releasing all retained state.
    ///
    /// Consumes the engine, so no further events can be delivered, and
    /// returns the final report.
    pub fn shutdown(mut self) -> RunSummary {
        let summary = self.metrics.summary();
        self.queue.clear();
        debug!(
            "scheduler down: {} job(s) completed",
            summary.jobs_completed
        );
        summary
    }

    /// Dispatches the queue head, if any, onto the freed core and
    /// returns its id.
    fn dispatch_head(&mut self, core_id: CoreId, time: Tick) -> Option<JobId> {
        match self.queue.peek_mut() {
            Some(head) => {
                head.dispatch(time);
                debug!("job {} takes core {core_id} at t={time}", head.id);
                Some(head.id)
            }
            None => {
                trace!("core {core_id} idle at t={time}");
                None
            }
        }
    }

    fn check_core(&self, core: CoreId) -> SchedResult<()> {
        let cores = self.cores.get();
        if core < cores {
            Ok(())
        } else {
            Err(SchedulerError::CoreOutOfRange { core, cores })
        }
    }
}
