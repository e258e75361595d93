//! Generic bounded-queue worker pool
//!
//! This module owns **thread management** only: sizing the pool from the
//! available CPU cores, wiring the bounded crossbeam channels, and tearing
//! everything down when the producer or the collector is done. It knows
//! nothing about what the jobs mean.
//!
//! Each run carries an [`AbortSignal`]. The pool raises it once the collector
//! is done or a worker panics; the producer may raise it itself. Workers stop
//! taking jobs and processors are expected to poll it during long work.
//!
//! ```text
//! ┌────────────┐   bounded    ┌────────────┐   bounded    ┌────────────┐
//! │  Producer  │─────────────▶│  Workers   │─────────────▶│ Collector  │
//! │  (thread)  │  job queue   │  (N x)     │ result queue │  (caller)  │
//! └────────────┘              └────────────┘              └────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use boxcount::parallel::WorkerPool;
//!
//! let pool = WorkerPool::new(4, 16);
//! let run = pool
//!     .run(
//!         |tx, _abort| (1..=10u64).filter(|n| tx.send(*n).is_ok()).count(),
//!         |n: u64, _worker_id, _abort| Some(n * n),
//!         |rx| rx.iter().sum::<u64>(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(run.produced, 10);
//! assert_eq!(run.collected, 385);
//! ```

pub mod core;

pub use self::core::{AbortSignal, PoolRun, WorkerPool};
