//! Read → solve → aggregate pipeline
//!
//! ```text
//! reader (producer thread) ──▶ job queue ──▶ workers ──▶ result queue ──▶ aggregator
//! ```
//!
//! Every stage is fail-fast: a bad line stops the reader, an infeasible
//! target stops the aggregator, and either one ends the run without a total.
//! Both raise the pool's abort signal, so solves still in flight for other
//! lines are dropped instead of run to completion.

pub mod aggregator;
pub mod error;
pub mod reader;
pub mod types;

pub use error::PackError;
pub use types::{Job, JobResult, Summary};

use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::PipelineConfig;
use crate::packing;
use crate::parallel::{AbortSignal, WorkerPool};

/// Solve a job unless the run is aborted first
pub fn solve_or_abort(job: Job, abort: &AbortSignal) -> Option<JobResult> {
    let min_boxes = packing::min_boxes_or_stop(job.target, || abort.is_aborted()).ok()?;
    Some(JobResult {
        line: job.line,
        target: job.target,
        min_boxes,
    })
}

/// Count boxes for every line of `input` using a worker pool sized by `config`
pub fn run_pipeline<I>(input: I, config: &PipelineConfig) -> Result<Summary>
where
    I: BufRead + Send,
{
    run_with_solver(input, config, solve_or_abort)
}

fn run_with_solver<I, S>(input: I, config: &PipelineConfig, solver: S) -> Result<Summary>
where
    I: BufRead + Send,
    S: Fn(Job, &AbortSignal) -> Option<JobResult> + Sync,
{
    let workers = config.resolved_workers();
    let pool: WorkerPool<Job, JobResult> = WorkerPool::new(workers, config.queue_capacity);

    tracing::info!(
        "Counting boxes with {} workers (queue capacity {})",
        pool.workers(),
        pool.queue_capacity()
    );

    let run = pool.run(
        move |jobs, abort| {
            let submitted = reader::submit_jobs(input, &jobs, abort);
            if submitted.is_err() {
                // Stop in-flight solves before the queue closes
                abort.abort();
            }
            submitted
        },
        |job, worker_id, abort| {
            let result = solver(job, abort)?;
            tracing::trace!("worker-{} solved line {}: {:?}", worker_id, result.line, result.min_boxes);
            Some(result)
        },
        aggregator::aggregate,
    )?;

    // A reader failure is reported ahead of anything the aggregator saw
    let submitted = run.produced?;
    let tally = run.collected?;

    if run.panicked_workers > 0 || tally.received != submitted {
        return Err(PackError::WorkerLost {
            expected: submitted,
            received: tally.received,
        }
        .into());
    }

    Ok(Summary {
        total_boxes: tally.total_boxes,
        lines: submitted,
        workers: pool.workers(),
    })
}

/// Open `path` and run the pipeline over it
pub fn run_file(path: &Path, config: &PipelineConfig) -> Result<Summary> {
    let file = File::open(path).map_err(|source| PackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    run_pipeline(BufReader::new(file), config)
}
