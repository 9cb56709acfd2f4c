//! Executor dispatch.
//!
//! Parsing ends with a value whose concrete type says what should happen.
//! Dispatch finds the executor that owns that type and runs it.
//!
//! ```text
//!                 ┌────────────┐ mismatch ┌────────────┐ mismatch ┌────────────┐
//! action ───────▶ │ executor 0 │ ───────▶ │ executor 1 │ ───────▶ │ executor 2 │ ──▶ Unhandled
//!                 └────────────┘          └────────────┘          └────────────┘
//!                       │ ok / error            │                       │
//!                       v                       v                       v
//!                    Handled / Execution error (stop, never try the next one)
//! ```
//!
//! - `executor.rs`: [`Executor`] (typed) and [`ErasedExecutor`] (the
//!   type-erased entry point that reports a mismatch).
//! - `dispatcher.rs`: [`Dispatcher`], the ordered driving loop.
//! - `metrics.rs`: [`DispatchRun`], the record produced by
//!   [`Dispatcher::dispatch_verbose`].
//! - `sink.rs`: [`Sink`] and its adapters, the handoff target for parsed values.
//!
//! Host applications define their own actions, so the set of action types is
//! open. The executor list is matched in order with a runtime type check
//! rather than an exhaustive `match`.

#[path = "dispatch/dispatcher.rs"]
mod dispatcher;
#[path = "dispatch/executor.rs"]
mod executor;
#[path = "dispatch/metrics.rs"]
mod metrics;
#[path = "dispatch/sink.rs"]
mod sink;

pub use dispatcher::Dispatcher;
pub use executor::{DispatchError, ErasedExecutor, ExecuteError, Executor};
pub use metrics::{Attempt, AttemptOutcome, DispatchRun};
pub use sink::{FnSink, Sink, StoreSink};
