use anyhow::{Result, anyhow};
use crossbeam::channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag for one pool run.
///
/// Set by the pool once the collector returns, by a worker that panics, or
/// by the producer itself. Workers check it before every job and pass it to
/// the processor so long computations can bail out.
#[derive(Debug, Default)]
pub struct AbortSignal {
    aborted: AtomicBool,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

/// Raises the abort signal if the owning worker unwinds
struct AbortOnPanic<'a>(&'a AbortSignal);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abort();
        }
    }
}

/// Outputs of a completed [`WorkerPool::run`]
#[derive(Debug)]
pub struct PoolRun<PO, CO> {
    pub produced: PO,
    pub collected: CO,
    /// Workers that panicked; each one lost the job it was holding
    pub panicked_workers: usize,
}

/// Fixed-size pool of worker threads fed from a bounded job queue.
///
/// Unlike a collect-then-dispatch executor, the pool streams: a producer
/// thread pushes jobs while the calling thread drains results. Both queues
/// are bounded, so a slow collector stalls the workers and busy workers
/// stall the producer.
pub struct WorkerPool<T, R> {
    workers: usize,
    queue_capacity: usize,
    _phantom: std::marker::PhantomData<(T, R)>,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<'a, T, R, F> {
    worker_id: usize,
    work_rx: Receiver<T>,
    result_tx: Sender<R>,
    processor: &'a F,
    abort: &'a AbortSignal,
}

impl<T, R> WorkerPool<T, R>
where
    T: Send,
    R: Send,
{
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        Self {
            workers: workers.max(1),
            queue_capacity,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Run `producer`, the workers and `collector` to completion.
    ///
    /// Workers are spawned first, then the producer gets the job sender on its
    /// own thread. Dropping the sender closes the job queue; workers drain it
    /// and exit, which disconnects the result queue seen by `collector`.
    ///
    /// `collector` runs on the calling thread. When it returns the run is
    /// aborted: queued jobs are discarded and `processor` sees the signal.
    /// A processor returning `None` abandons its job without a result.
    ///
    /// A worker panic is counted in [`PoolRun::panicked_workers`] and aborts
    /// the run; a producer panic is an error.
    pub fn run<P, F, C, PO, CO>(&self, producer: P, processor: F, collector: C) -> Result<PoolRun<PO, CO>>
    where
        P: FnOnce(Sender<T>, &AbortSignal) -> PO + Send,
        F: Fn(T, usize, &AbortSignal) -> Option<R> + Sync,
        C: FnOnce(Receiver<R>) -> CO,
        PO: Send,
    {
        let (work_tx, work_rx): (Sender<T>, Receiver<T>) = bounded(self.queue_capacity);
        let (result_tx, result_rx): (Sender<R>, Receiver<R>) = bounded(self.queue_capacity);
        let abort = AbortSignal::new();

        crossbeam::thread::scope(|s| -> Result<PoolRun<PO, CO>> {
            let abort = &abort;

            let worker_handles: Vec<_> = (0..self.workers)
                .map(|worker_id| {
                    let ctx = WorkerContext {
                        worker_id,
                        work_rx: work_rx.clone(),
                        result_tx: result_tx.clone(),
                        processor: &processor,
                        abort,
                    };

                    s.spawn(move |_| Self::worker_thread(ctx))
                })
                .collect();

            // Only workers may hold these, or the queues never disconnect
            drop(work_rx);
            drop(result_tx);

            let producer_handle = s.spawn(move |_| producer(work_tx, abort));

            let collected = collector(result_rx);
            abort.abort();

            let panicked_workers = worker_handles
                .into_iter()
                .map(|handle| handle.join())
                .filter(|joined| joined.is_err())
                .count();
            if panicked_workers > 0 {
                tracing::warn!("{} worker thread(s) panicked", panicked_workers);
            }

            let produced = producer_handle
                .join()
                .map_err(|_| anyhow!("Producer thread panicked"))?;

            Ok(PoolRun {
                produced,
                collected,
                panicked_workers,
            })
        })
        .map_err(|_| anyhow!("Thread panic occurred during parallel execution"))?
    }

    fn worker_thread<F>(ctx: WorkerContext<'_, T, R, F>)
    where
        F: Fn(T, usize, &AbortSignal) -> Option<R>,
    {
        let _guard = AbortOnPanic(ctx.abort);
        tracing::trace!("worker-{} started", ctx.worker_id);

        while !ctx.abort.is_aborted() {
            let Ok(work_item) = ctx.work_rx.recv() else {
                break;
            };
            if ctx.abort.is_aborted() {
                break;
            }

            let Some(result) = (ctx.processor)(work_item, ctx.worker_id, ctx.abort) else {
                tracing::trace!("worker-{} abandoned a job", ctx.worker_id);
                break;
            };

            if ctx.result_tx.send(result).is_err() {
                tracing::trace!("worker-{} stopping: collector gone", ctx.worker_id);
                break;
            }
        }
    }

    /// Calculate workers from available CPU cores and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. If workers_config > 0, use it as given
    /// 2. Otherwise: max(1, num_cpus::get() * thread_percentage / 100)
    /// ```
    ///
    /// # Examples
    /// ```rust
    /// use boxcount::parallel::WorkerPool;
    ///
    /// let workers = WorkerPool::<u64, u64>::calculate_optimal_workers(0, 100);
    /// assert!(workers >= 1);
    ///
    /// let workers = WorkerPool::<u64, u64>::calculate_optimal_workers(3, 100);
    /// assert_eq!(workers, 3);
    /// ```
    pub fn calculate_optimal_workers(workers_config: usize, thread_percentage: u8) -> usize {
        if workers_config > 0 {
            return workers_config;
        }

        let available_cores = num_cpus::get();
        std::cmp::max(1, (available_cores * thread_percentage as usize) / 100)
    }
}
