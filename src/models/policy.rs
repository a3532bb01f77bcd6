//! Scheduling disciplines.
//!
//! Each discipline is one ordering relation over the ready queue: the
//! queue's sort order *is* the policy. Selected once at engine
//! construction and immutable for the run.
//!
//! # Disciplines
//!
//! | Policy | Primary key | Tie-break | Preemptive |
//! |--------|-------------|-----------|------------|
//! | FCFS | arrival time | — | no |
//! | SJF | total service time | — | no |
//! | PSJF | remaining service time | arrival time | on arrival |
//! | PRI | priority (lower = urgent) | — | no |
//! | PPRI | priority | arrival time | on arrival |
//! | RR | none (insertion order) | — | on quantum expiry |
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Job;
use crate::queue::QueueOrder;

/// A fixed scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// First-come first-served: run jobs in arrival order.
    Fcfs,
    /// Shortest job first: shortest total service demand next.
    Sjf,
    /// Preemptive shortest job first: least remaining demand next; a
    /// shorter arrival preempts the running job.
    Psjf,
    /// Priority: most urgent (lowest value) next.
    Pri,
    /// Preemptive priority: a more urgent arrival preempts the running
    /// job.
    Ppri,
    /// Round-robin: pure arrival order, rotated on quantum expiry.
    Rr,
}

impl Policy {
    /// The ordering relation this discipline imposes on the ready
    /// queue. Ties not resolved here fall back to insertion order.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            Policy::Fcfs => a.arrival_time.cmp(&b.arrival_time),
            Policy::Sjf => a.service_time.cmp(&b.service_time),
            Policy::Psjf => a
                .remaining_time
                .cmp(&b.remaining_time)
                .then(a.arrival_time.cmp(&b.arrival_time)),
            Policy::Pri => a.priority.cmp(&b.priority),
            Policy::Ppri => a
                .priority
                .cmp(&b.priority)
                .then(a.arrival_time.cmp(&b.arrival_time)),
            // Constant Equal: every insertion lands at the tail.
            Policy::Rr => Ordering::Equal,
        }
    }

    /// Whether a running job can lose its core before completing.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Psjf | Policy::Ppri | Policy::Rr)
    }

    /// Whether the finishing job is always the queue head.
    ///
    /// Under SJF/PRI/PPRI a later, more urgent arrival sits in front of
    /// the running job without preempting it, so completion must locate
    /// the finished job by id instead of polling the head.
    pub fn completes_at_head(&self) -> bool {
        matches!(self, Policy::Fcfs | Policy::Psjf | Policy::Rr)
    }
}

impl QueueOrder<Job> for Policy {
    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        Policy::compare(self, a, b)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Psjf => "PSJF",
            Policy::Pri => "PRI",
            Policy::Ppri => "PPRI",
            Policy::Rr => "RR",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job(id: u32, arrival: i64, service: i64, priority: i32) -> Job {
        Job::new(id, arrival, service, priority)
    }

    #[test]
    fn test_fcfs_orders_by_arrival() {
        let early = make_job(1, 0, 9, 0);
        let late = make_job(2, 5, 1, 0);
        assert_eq!(Policy::Fcfs.compare(&early, &late), Ordering::Less);
        assert_eq!(Policy::Fcfs.compare(&late, &early), Ordering::Greater);
    }

    #[test]
    fn test_sjf_orders_by_total_service() {
        let short = make_job(1, 5, 2, 0);
        let long = make_job(2, 0, 8, 0);
        assert_eq!(Policy::Sjf.compare(&short, &long), Ordering::Less);
    }

    #[test]
    fn test_psjf_orders_by_remaining_then_arrival() {
        let mut a = make_job(1, 0, 8, 0);
        a.remaining_time = 3;
        let b = make_job(2, 4, 3, 0); // same remaining, later arrival
        assert_eq!(Policy::Psjf.compare(&a, &b), Ordering::Less);

        let mut c = make_job(3, 9, 8, 0);
        c.remaining_time = 1;
        assert_eq!(Policy::Psjf.compare(&c, &a), Ordering::Less);
    }

    #[test]
    fn test_pri_lower_value_is_more_urgent() {
        let urgent = make_job(1, 5, 4, 1);
        let lax = make_job(2, 0, 4, 7);
        assert_eq!(Policy::Pri.compare(&urgent, &lax), Ordering::Less);
    }

    #[test]
    fn test_ppri_breaks_priority_ties_by_arrival() {
        let first = make_job(1, 0, 4, 3);
        let second = make_job(2, 6, 4, 3);
        assert_eq!(Policy::Ppri.compare(&first, &second), Ordering::Less);
        assert_eq!(Policy::Ppri.compare(&second, &first), Ordering::Greater);
    }

    #[test]
    fn test_rr_treats_all_jobs_equal() {
        let a = make_job(1, 0, 4, 0);
        let b = make_job(2, 6, 9, 5);
        assert_eq!(Policy::Rr.compare(&a, &b), Ordering::Equal);
        assert_eq!(Policy::Rr.compare(&b, &a), Ordering::Equal);
    }

    #[test]
    fn test_preemption_groups() {
        assert!(!Policy::Fcfs.is_preemptive());
        assert!(!Policy::Sjf.is_preemptive());
        assert!(!Policy::Pri.is_preemptive());
        assert!(Policy::Psjf.is_preemptive());
        assert!(Policy::Ppri.is_preemptive());
        assert!(Policy::Rr.is_preemptive());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Policy::Psjf).unwrap(), "\"psjf\"");
        let parsed: Policy = serde_json::from_str("\"rr\"").unwrap();
        assert_eq!(parsed, Policy::Rr);
    }
}
