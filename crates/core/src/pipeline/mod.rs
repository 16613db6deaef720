//! Orchestration of a pipeline run.
//!
//! A run walks [`STEP_COUNT`] steps. Steps 0-2 are paced, the request is
//! issued, step 3 completes once it has settled, the payload is rendered and
//! step 4 precedes the reveal of the results. Any failure stops the walk and
//! leaves exactly one error indicator on the dashboard.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{
    animator::Animator,
    backend::{Backend, Download, Endpoint, RunParams},
    payload::{FullResult, MlpResult},
    progress::{ProgressTracker, STEP_COUNT},
    surface::{Dashboard, Trigger},
    table::fill_table,
    DashboardError, ResultRenderer, Result,
};

/// Step whose completion waits for the backend instead of the animator.
pub const NETWORK_STEP: usize = 3;

/// The two pipeline flavours the dashboard can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Dataset summary plus logistic regression.
    Full,
    /// Dataset summary plus the MLP network only.
    SingleModel,
}

impl Variant {
    pub fn endpoint(self) -> Endpoint {
        match self {
            Self::Full => Endpoint::Full,
            Self::SingleModel => Endpoint::Mlp,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full pipeline",
            Self::SingleModel => "single-model pipeline",
        }
    }

    fn trigger(self, dashboard: &mut Dashboard) -> &mut Trigger {
        match self {
            Self::Full => &mut dashboard.full_trigger,
            Self::SingleModel => &mut dashboard.mlp_trigger,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw user input for a run.
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    pub rows: String,
    pub force: bool,
}

impl RunInput {
    pub fn new(rows: impl Into<String>, force: bool) -> Self {
        Self {
            rows: rows.into(),
            force,
        }
    }
}

/// Coarse lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Success,
    Error,
}

/// Fine-grained position in the step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Idle,
    StepPending(usize),
    Success,
    Error,
}

/// One execution of a variant. Not persisted once the dashboard is updated.
#[derive(Debug)]
pub struct PipelineRun {
    variant: Variant,
    params: RunParams,
    phase: RunPhase,
    failure: Option<DashboardError>,
}

impl PipelineRun {
    fn new(variant: Variant, params: RunParams) -> Self {
        Self {
            variant,
            params,
            phase: RunPhase::Idle,
            failure: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn params(&self) -> RunParams {
        self.params
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn status(&self) -> RunStatus {
        match self.phase {
            RunPhase::Idle => RunStatus::Idle,
            RunPhase::StepPending(_) => RunStatus::Running,
            RunPhase::Success => RunStatus::Success,
            RunPhase::Error => RunStatus::Error,
        }
    }

    /// Failure that ended the run, if any.
    pub fn failure(&self) -> Option<&DashboardError> {
        self.failure.as_ref()
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(
            next > self.phase && !matches!(self.phase, RunPhase::Success | RunPhase::Error),
            "run phase regressed from {:?} to {next:?}",
            self.phase
        );
        self.phase = next;
    }

    fn fail(&mut self, err: DashboardError) {
        self.advance(RunPhase::Error);
        self.failure = Some(err);
    }
}

/// Exclusive access to the dashboard for the length of one run. The
/// variant's trigger is disabled while the guard lives and re-enabled when it
/// drops, unwinding included.
pub struct TriggerGuard<'a> {
    dashboard: &'a mut Dashboard,
    variant: Variant,
}

impl<'a> TriggerGuard<'a> {
    pub fn engage(dashboard: &'a mut Dashboard, variant: Variant) -> Self {
        variant.trigger(dashboard).disabled = true;
        Self { dashboard, variant }
    }
}

impl Deref for TriggerGuard<'_> {
    type Target = Dashboard;

    fn deref(&self) -> &Dashboard {
        &*self.dashboard
    }
}

impl DerefMut for TriggerGuard<'_> {
    fn deref_mut(&mut self) -> &mut Dashboard {
        &mut *self.dashboard
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.variant.trigger(self.dashboard).disabled = false;
    }
}

/// Drives pipeline runs against a backend, pacing steps through an animator.
pub struct PipelineController<B, A> {
    backend: B,
    animator: A,
    renderer: ResultRenderer,
}

impl<B: Backend, A: Animator> PipelineController<B, A> {
    pub fn new(backend: B, animator: A) -> Self {
        Self {
            backend,
            animator,
            renderer: ResultRenderer::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs `/start` and renders the summary, logistic model and previews.
    pub async fn start_full_pipeline(
        &self,
        dashboard: &mut Dashboard,
        input: &RunInput,
    ) -> Result<PipelineRun> {
        self.run(Variant::Full, dashboard, input).await
    }

    /// Runs `/start_mlp` and renders the summary, MLP model, architecture and
    /// previews, then focuses the architecture region.
    pub async fn start_single_model_pipeline(
        &self,
        dashboard: &mut Dashboard,
        input: &RunInput,
    ) -> Result<PipelineRun> {
        self.run(Variant::SingleModel, dashboard, input).await
    }

    /// Fails with [`DashboardError::AlreadyRunning`] only when the variant's
    /// trigger is disabled; every other failure ends up in the returned run.
    async fn run(
        &self,
        variant: Variant,
        dashboard: &mut Dashboard,
        input: &RunInput,
    ) -> Result<PipelineRun> {
        if variant.trigger(dashboard).disabled {
            tracing::warn!(%variant, "trigger disabled, ignoring start");
            return Err(DashboardError::AlreadyRunning(variant.name()));
        }
        let mut dashboard = TriggerGuard::engage(dashboard, variant);

        let params = RunParams::from_input(&input.rows, input.force);
        let mut run = PipelineRun::new(variant, params);
        tracing::info!(%variant, rows = params.rows, force = params.force, "starting run");

        prepare(&mut dashboard, variant, &params);
        run.advance(RunPhase::StepPending(0));

        match self.execute(&mut dashboard, &mut run).await {
            Ok(()) => {
                run.advance(RunPhase::Success);
                tracing::info!(%variant, "run succeeded");
            }
            Err(err) => {
                tracing::warn!(%variant, error = %err, "run failed");
                dashboard.results_hidden = true;
                dashboard.error.set_text(err.user_message());
                dashboard.error.show();
                run.fail(err);
            }
        }
        Ok(run)
    }

    async fn execute(&self, dashboard: &mut Dashboard, run: &mut PipelineRun) -> Result<()> {
        for step in 0..NETWORK_STEP {
            self.step(dashboard, run, step).await;
        }

        let variant = run.variant();
        tracing::debug!(%variant, "waiting for backend");
        let envelope = self.backend.start(variant.endpoint(), &run.params()).await?;
        self.step(dashboard, run, NETWORK_STEP).await;

        match variant {
            Variant::Full => {
                let result: FullResult = envelope.into_result()?;
                dashboard.error.hide();
                self.renderer
                    .render_summary(&mut dashboard.summary, &result.dataset_info);
                self.renderer
                    .render_model(&mut dashboard.logistic, &result.logistic);
                fill_table(&mut dashboard.preview_x, &result.preview_x);
                fill_table(&mut dashboard.preview_y, &result.preview_y);
            }
            Variant::SingleModel => {
                let result: MlpResult = envelope.into_result()?;
                dashboard.error.hide();
                self.renderer
                    .render_summary(&mut dashboard.summary, &result.dataset_info);
                fill_table(&mut dashboard.preview_x, &result.preview_x);
                fill_table(&mut dashboard.preview_y, &result.preview_y);
                self.renderer.render_model(&mut dashboard.mlp, &result.mlp);
                self.renderer
                    .render_architecture(dashboard, result.mlp.architecture.as_ref())?;
            }
        }

        for step in NETWORK_STEP + 1..STEP_COUNT {
            self.step(dashboard, run, step).await;
        }
        dashboard.results_hidden = false;
        if variant == Variant::SingleModel {
            self.renderer.focus_architecture(dashboard);
        }
        Ok(())
    }

    async fn step(&self, dashboard: &mut Dashboard, run: &mut PipelineRun, step: usize) {
        self.animator.pace(step).await;
        dashboard.progress.mark_step_done(step);
        if step + 1 < STEP_COUNT {
            run.advance(RunPhase::StepPending(step + 1));
        }
    }
}

/// Clears what a previous run left behind and points the download links at
/// the new parameters. Rendered result fields stay, hidden.
fn prepare(dashboard: &mut Dashboard, variant: Variant, params: &RunParams) {
    dashboard.error.hide();
    dashboard.results_hidden = true;
    dashboard.steps_hidden = false;
    dashboard.progress = ProgressTracker::new(STEP_COUNT);
    dashboard.focus = None;

    match variant {
        Variant::Full => {
            dashboard.dataset_link.href = Some(Download::Dataset.href(params));
            dashboard.results_link.href = Some(Download::Results.href(params));
        }
        Variant::SingleModel => {
            dashboard.mlp_results_link.href = Some(Download::MlpResults.href(params));
        }
    }
}
