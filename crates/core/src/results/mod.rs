use crate::{
    payload::{ConfusionMatrix, DatasetInfo, Metrics, ModelResult},
    surface::{Dashboard, MetricsView, ModelView, Region, SummaryView, TableRow},
    Result,
};

/// Row labels of the rendered confusion matrix, actual class first.
pub const CONFUSION_ROW_LABELS: [&str; 2] = ["Real: No Aprobado (0)", "Real: Aprobado (1)"];

/// Writes decoded results into the bound display fields. Nothing outside the
/// dashboard passed in is touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultRenderer;

impl ResultRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_summary(&self, view: &mut SummaryView, info: &DatasetInfo) {
        view.rows.set_text(info.rows.to_string());
        view.cols.set_text(info.cols.to_string());
        view.x_cols.set_text(info.x_cols.join(", "));
        view.y_cols.set_text(info.y_cols.join(", "));
        view.note.set_text(info.note.as_str());
    }

    pub fn render_model(&self, view: &mut ModelView, model: &ModelResult) {
        render_metrics(&mut view.metrics, &model.metrics);
        view.confusion.body = confusion_rows(&model.confusion_matrix);
    }

    /// Pretty-prints the architecture into its region. The focus shift is
    /// requested separately once the whole run has rendered.
    pub fn render_architecture(
        &self,
        dashboard: &mut Dashboard,
        architecture: Option<&serde_json::Value>,
    ) -> Result<()> {
        let text = match architecture {
            Some(value) => serde_json::to_string_pretty(value)?,
            None => String::new(),
        };
        dashboard.architecture.set_text(text);
        Ok(())
    }

    pub fn focus_architecture(&self, dashboard: &mut Dashboard) {
        dashboard.focus = Some(Region::Architecture);
    }
}

fn render_metrics(view: &mut MetricsView, metrics: &Metrics) {
    view.accuracy.set_text(fixed3(metrics.accuracy));
    view.error_rate.set_text(fixed3(metrics.error_rate));
    view.precision.set_text(fixed3(metrics.precision));
    view.recall.set_text(fixed3(metrics.recall));
    view.f1.set_text(fixed3(metrics.f1));
}

/// Three decimals with exact ties rounded away from zero, as browsers do.
/// `{:.3}` alone rounds ties to even (0.8125 -> "0.812").
fn fixed3(value: f64) -> String {
    let scaled = value * 1000.0;
    // A tie needs four exact decimals, so the value is a multiple of 1/16 and
    // the product above is exact.
    if (value * 16.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        return format!("{:.3}", scaled.round() / 1000.0);
    }
    format!("{value:.3}")
}

fn confusion_rows(matrix: &ConfusionMatrix) -> Vec<TableRow> {
    CONFUSION_ROW_LABELS
        .iter()
        .zip(matrix)
        .map(|(label, row)| TableRow::labelled(*label, row.iter().map(u64::to_string).collect()))
        .collect()
}
