//! The two kinds of actors around a spool.
//!
//! A [`User`] submits a fixed number of named jobs, pausing between each
//! submission. A [`Printer`] repeatedly takes the next job and pauses while
//! it "prints". Both hold an [`Arc`] handle to the same queue.

use std::sync::Arc;

use crate::Job;
use crate::pace::Pace;
use crate::queue::BoundedQueue;

pub type Spool = BoundedQueue<Job>;

pub struct User<P> {
    name: String,
    jobs: usize,
    spool: Arc<Spool>,
    pace: P,
}

impl<P: Pace> User<P> {
    pub fn new(name: impl Into<String>, jobs: usize, spool: Arc<Spool>, pace: P) -> Self {
        Self {
            name: name.into(),
            jobs,
            spool,
            pace,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submits every job in order, returning how many were sent.
    pub fn submit_all(&self) -> usize {
        for i in 1..=self.jobs {
            let job = Job::new(format!("{} - Job {i}", self.name));
            tracing::info!("submitting job, user={}, job={job}", self.name);
            self.spool.submit(job);
            tracing::info!(
                "submitted job, user={}, queued={}",
                self.name,
                self.spool.len()
            );
            self.pace.pause();
        }
        self.jobs
    }
}

pub struct Printer<P> {
    spool: Arc<Spool>,
    pace: P,
}

impl<P: Pace> Printer<P> {
    pub fn new(spool: Arc<Spool>, pace: P) -> Self {
        Self { spool, pace }
    }

    /// Waits for the next job, prints it and returns it once printing is done.
    pub fn print_next(&self) -> Job {
        let job = self.spool.take_next();
        tracing::info!("printing job, job={job}, remaining={}", self.spool.len());
        self.pace.pause();
        job
    }

    /// Prints jobs forever.
    pub fn run(&self) -> ! {
        tracing::info!("started printer, capacity={}", self.spool.capacity());
        loop {
            self.print_next();
        }
    }
}
