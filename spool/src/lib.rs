//! A bounded print spool shared by many users and one printer.
//!
//! The core is [`BoundedQueue`], a blocking FIFO with a fixed capacity, and
//! [`SharedInstance`], which creates the process-wide spool exactly once.

pub mod pace;
pub mod queue;
pub mod role;
pub mod shared;

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub use self::pace::Pace;
pub use self::queue::{BoundedQueue, QueueStats};
pub use self::role::{Printer, Spool, User};
pub use self::shared::SharedInstance;

/// Capacity of the process-wide spool.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(2).unwrap();

/// An opaque print job.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Job(Arc<str>);

impl Job {
    pub fn new(content: impl Into<Arc<str>>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the process-wide spool, creating it on first use.
pub fn instance() -> Arc<Spool> {
    static SPOOL: SharedInstance<Spool> = SharedInstance::new();
    SPOOL.get_or_init(|| {
        tracing::debug!("created spool, capacity={DEFAULT_CAPACITY}");
        BoundedQueue::new(DEFAULT_CAPACITY)
    })
}

#[test]
fn instance_is_shared() {
    let handles = std::thread::scope(|cx| {
        let workers = (0..8).map(|_| cx.spawn(instance)).collect::<Vec<_>>();
        workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .collect::<Vec<_>>()
    });

    let spool = instance();
    assert_eq!(spool.capacity(), 2);
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, &spool)));
}
