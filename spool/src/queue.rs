use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// A FIFO queue holding at most `capacity` items.
///
/// [`submit`](Self::submit) blocks while the queue is full and
/// [`take_next`](Self::take_next) blocks while it is empty. All state lives
/// behind one mutex; `not_full` and `not_empty` are signalled whenever a slot
/// is freed or an item becomes available.
pub struct BoundedQueue<T> {
    state: Mutex<State<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: NonZeroUsize,
}

struct State<T> {
    items: VecDeque<T>,
    stats: QueueStats,
}

/// Counters maintained alongside the queued items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Items accepted since creation.
    pub submitted: u64,
    /// Items removed since creation.
    pub taken: u64,
    /// Highest number of items ever queued at once.
    pub peak: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            state: Mutex::new(State {
                items: VecDeque::with_capacity(capacity.get()),
                stats: QueueStats::default(),
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Appends `item` to the tail, waiting for a free slot if the queue is full.
    pub fn submit(&self, item: T) {
        let mut state = self.lock();
        while state.items.len() >= self.capacity.get() {
            tracing::trace!("queue full, waiting, capacity={}", self.capacity);
            state = self
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        self.push_locked(&mut state, item);
    }

    /// Appends `item` without waiting.
    ///
    /// # Errors
    ///
    /// Returns `Err(item)` if the queue is full, allowing retry.
    pub fn try_submit(&self, item: T) -> Result<(), T> {
        let mut state = self.lock();
        if state.items.len() >= self.capacity.get() {
            return Err(item);
        }
        self.push_locked(&mut state, item);
        Ok(())
    }

    /// Removes the head item, waiting for one to arrive if the queue is empty.
    pub fn take_next(&self) -> T {
        let mut state = self.lock();
        loop {
            if let Some(item) = self.pop_locked(&mut state) {
                return item;
            }
            tracing::debug!("no jobs queued, waiting");
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Removes the head item without waiting.
    pub fn try_take(&self) -> Option<T> {
        self.pop_locked(&mut self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock().items.len() >= self.capacity.get()
    }

    pub fn stats(&self) -> QueueStats {
        self.lock().stats
    }

    // Poison is ignored: the state is only ever mutated by whole `VecDeque`
    // operations.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_locked(&self, state: &mut State<T>, item: T) {
        debug_assert!(state.items.len() < self.capacity.get());
        state.items.push_back(item);

        let len = state.items.len();
        state.stats.submitted += 1;
        state.stats.peak = state.stats.peak.max(len);
        tracing::debug!("queued job, len={len}");

        self.not_empty.notify_one();
    }

    fn pop_locked(&self, state: &mut State<T>) -> Option<T> {
        let item = state.items.pop_front()?;

        state.stats.taken += 1;
        tracing::debug!("dequeued job, remaining={}", state.items.len());

        self.not_full.notify_one();
        Some(item)
    }
}
