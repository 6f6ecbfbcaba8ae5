use std::sync::{Arc, OnceLock};

/// A lazily created value shared through [`Arc`] handles.
///
/// The first call to [`get_or_init`](Self::get_or_init) constructs the value;
/// callers racing with it block until construction finishes and then receive
/// a handle to the same allocation. The value is never reset.
pub struct SharedInstance<T>(OnceLock<Arc<T>>);

impl<T> SharedInstance<T> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        self.0.get_or_init(|| Arc::new(init())).clone()
    }

    /// Returns the instance if it has already been created.
    pub fn get(&self) -> Option<Arc<T>> {
        self.0.get().cloned()
    }
}

impl<T> Default for SharedInstance<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn racing_first_access() {
        const THREADS: usize = 50;

        let constructed = AtomicUsize::new(0);
        let shared = SharedInstance::new();
        let barrier = Barrier::new(THREADS);

        let handles = std::thread::scope(|cx| {
            let workers = (0..THREADS)
                .map(|_| {
                    cx.spawn(|| {
                        barrier.wait();
                        shared.get_or_init(|| {
                            constructed.fetch_add(1, Ordering::Relaxed);
                            std::thread::yield_now();
                            String::from("spool")
                        })
                    })
                })
                .collect::<Vec<_>>();
            workers
                .into_iter()
                .map(|w| w.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(constructed.load(Ordering::Relaxed), 1);
        let first = shared.get().unwrap();
        assert_eq!(*first, "spool");
        assert!(handles.iter().all(|h| Arc::ptr_eq(h, &first)));
    }

    #[test]
    fn get_before_init() {
        let shared = SharedInstance::<u32>::new();
        assert!(shared.get().is_none());
        assert_eq!(*shared.get_or_init(|| 1), 1);
        assert_eq!(*shared.get_or_init(|| 2), 1);
    }
}
