//! Core library for the pipeline dashboard client.
//!
//! The crate starts remote computation runs (dataset generation plus model
//! training), walks a fixed sequence of progress steps while the backend
//! works, and renders the returned summary, metrics, confusion matrices,
//! preview tables and network architecture into a [`Dashboard`] that the
//! caller owns. Each module owns one concern: pacing, transport, the typed
//! response schema, rendering and orchestration.

pub mod animator;
pub mod backend;
pub mod config;
pub mod error;
pub mod payload;
pub mod pipeline;
pub mod progress;
pub mod results;
pub mod surface;
pub mod table;

pub use animator::{Animator, NoopAnimator, TokioAnimator};
pub use backend::{Backend, Download, Endpoint, HttpBackend, RunParams};
pub use config::{AppConfig, BackendConfig, PacingConfig};
pub use error::{DashboardError, Result};
pub use payload::{ConfusionMatrix, DatasetInfo, Envelope, FullResult, Metrics, MlpResult};
pub use pipeline::{PipelineController, PipelineRun, RunInput, RunPhase, RunStatus, Variant};
pub use progress::{ProgressTracker, Step, STEP_COUNT};
pub use results::ResultRenderer;
pub use surface::{Dashboard, Table, TableRow, TextField};
pub use table::fill_table;
