use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use argh::FromArgs;
use spool::pace::{Fixed, Jitter};
use spool::{BoundedQueue, Printer, Spool, User};

#[derive(Debug, FromArgs)]
/// Simulate users sharing a single printer through a bounded spool
#[argh(help_triggers("--help"))]
struct Args {
    /// number of users submitting jobs
    #[argh(option, default = "3")]
    users: usize,
    /// jobs submitted by each user
    #[argh(option, default = "5")]
    jobs: usize,
    /// maximum number of queued jobs
    #[argh(option, default = "2")]
    capacity: usize,
    /// time spent printing a job, in milliseconds
    #[argh(option, default = "2000", arg_name = "ms")]
    print_ms: u64,
    /// shortest pause between two submissions, in milliseconds
    #[argh(option, default = "1000", arg_name = "ms")]
    min_gap_ms: u64,
    /// longest pause between two submissions, in milliseconds
    #[argh(option, default = "3000", arg_name = "ms")]
    max_gap_ms: u64,
}

impl Args {
    fn validate(&self) -> Result<NonZeroUsize> {
        ensure!(self.users > 0, "users must not be zero");
        ensure!(self.jobs > 0, "jobs must not be zero");
        ensure!(
            self.min_gap_ms <= self.max_gap_ms,
            "min-gap-ms ({}) must not exceed max-gap-ms ({})",
            self.min_gap_ms,
            self.max_gap_ms
        );
        NonZeroUsize::new(self.capacity).ok_or_else(|| anyhow!("capacity must not be zero"))
    }

    fn spool(&self, capacity: NonZeroUsize) -> Arc<Spool> {
        if capacity == spool::DEFAULT_CAPACITY {
            spool::instance()
        } else {
            Arc::new(BoundedQueue::new(capacity))
        }
    }
}

pub fn main() -> Result<()> {
    let args = argh::from_env::<Args>();
    tracing_subscriber::fmt()
        .with_thread_names(true)
        .without_time()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let capacity = args.validate()?;
    let spool = args.spool(capacity);

    let printer = Printer::new(spool.clone(), Fixed(Duration::from_millis(args.print_ms)));
    // Never joined; the printer is abandoned when the process exits.
    let _printer: JoinHandle<()> = std::thread::Builder::new()
        .name("printer".into())
        .spawn(move || printer.run())?;

    let gap = Jitter::new(
        Duration::from_millis(args.min_gap_ms),
        Duration::from_millis(args.max_gap_ms),
    );
    let users = (1..=args.users)
        .map(|k| {
            let user = User::new(format!("User{k}"), args.jobs, spool.clone(), gap);
            std::thread::Builder::new()
                .name(user.name().to_owned())
                .spawn(move || user.submit_all())
        })
        .collect::<std::io::Result<Vec<_>>>()?;

    let mut submitted = 0;
    for user in users {
        submitted += user
            .join()
            .map_err(|_| anyhow!("a user thread panicked"))?;
    }

    let stats = spool.stats();
    tracing::info!(
        "all jobs submitted, submitted={submitted}, printed={}, peak={}",
        stats.taken,
        stats.peak,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            users: 3,
            jobs: 5,
            capacity: 2,
            print_ms: 0,
            min_gap_ms: 0,
            max_gap_ms: 0,
        }
    }

    #[test]
    fn default_capacity_uses_shared_spool() {
        let args = args();
        let capacity = args.validate().unwrap();
        assert!(Arc::ptr_eq(&args.spool(capacity), &spool::instance()));

        let args = Args { capacity: 4, ..args };
        let spool = args.spool(args.validate().unwrap());
        assert_eq!(spool.capacity(), 4);
        assert!(!Arc::ptr_eq(&spool, &spool::instance()));
    }

    #[test]
    fn rejects_invalid_settings() {
        let err = Args { capacity: 0, ..args() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "capacity must not be zero");

        let err = Args { users: 0, ..args() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "users must not be zero");

        let err = Args { jobs: 0, ..args() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "jobs must not be zero");

        let err = Args {
            min_gap_ms: 10,
            max_gap_ms: 5,
            ..args()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "min-gap-ms (10) must not exceed max-gap-ms (5)"
        );
    }
}
