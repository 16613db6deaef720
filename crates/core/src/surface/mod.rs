//! Display surfaces the pipeline writes into.
//!
//! Everything a run touches lives in one [`Dashboard`] value that callers
//! construct and hand to the controller. Front ends (the CLI, a test) read it
//! back after the run.

use std::fmt;

use crate::ProgressTracker;

/// A text element that can be hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub hidden: bool,
}

impl TextField {
    pub fn hidden() -> Self {
        Self {
            text: String::new(),
            hidden: true,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// One body row. Labelled rows carry a leading header cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub label: Option<String>,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { label: None, cells }
    }

    pub fn labelled(label: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            label: Some(label.into()),
            cells,
        }
    }
}

/// Header plus body table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub body: Vec<TableRow>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }
}

/// Hyperlink whose target is set by the controller but never fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub href: Option<String>,
}

/// Control that starts a pipeline variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    pub disabled: bool,
}

/// Regions that can receive a focus shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Architecture,
}

#[derive(Debug, Clone, Default)]
pub struct SummaryView {
    pub rows: TextField,
    pub cols: TextField,
    pub x_cols: TextField,
    pub y_cols: TextField,
    pub note: TextField,
}

#[derive(Debug, Clone, Default)]
pub struct MetricsView {
    pub accuracy: TextField,
    pub error_rate: TextField,
    pub precision: TextField,
    pub recall: TextField,
    pub f1: TextField,
}

impl MetricsView {
    fn entries(&self) -> [(&'static str, &TextField); 5] {
        [
            ("accuracy", &self.accuracy),
            ("error_rate", &self.error_rate),
            ("precision", &self.precision),
            ("recall", &self.recall),
            ("f1", &self.f1),
        ]
    }
}

/// Metrics and confusion matrix of one trained model.
#[derive(Debug, Clone, Default)]
pub struct ModelView {
    pub metrics: MetricsView,
    pub confusion: Table,
}

/// The whole page: controls, progress, results and the error indicator.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub full_trigger: Trigger,
    pub mlp_trigger: Trigger,
    pub dataset_link: Link,
    pub results_link: Link,
    pub mlp_results_link: Link,
    pub steps_hidden: bool,
    pub progress: ProgressTracker,
    pub results_hidden: bool,
    pub error: TextField,
    pub summary: SummaryView,
    pub logistic: ModelView,
    pub mlp: ModelView,
    pub architecture: TextField,
    pub preview_x: Table,
    pub preview_y: Table,
    pub focus: Option<Region>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            full_trigger: Trigger::default(),
            mlp_trigger: Trigger::default(),
            dataset_link: Link::default(),
            results_link: Link::default(),
            mlp_results_link: Link::default(),
            steps_hidden: true,
            progress: ProgressTracker::default(),
            results_hidden: true,
            error: TextField::hidden(),
            summary: SummaryView::default(),
            logistic: ModelView::default(),
            mlp: ModelView::default(),
            architecture: TextField::default(),
            preview_x: Table::default(),
            preview_y: Table::default(),
            focus: None,
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.steps_hidden {
            let marks: String = self
                .progress
                .steps()
                .iter()
                .map(|step| if step.done { '#' } else { '.' })
                .collect();
            writeln!(f, "progress [{marks}] {}", self.progress.bar_width())?;
        }
        if self.error.is_visible() {
            writeln!(f, "{}", self.error.text)?;
        }
        if self.results_hidden {
            return Ok(());
        }

        writeln!(f, "rows: {}", self.summary.rows.text)?;
        writeln!(f, "cols: {}", self.summary.cols.text)?;
        writeln!(f, "X: {}", self.summary.x_cols.text)?;
        writeln!(f, "Y: {}", self.summary.y_cols.text)?;
        writeln!(f, "note: {}", self.summary.note.text)?;

        for (name, model) in [("logistic", &self.logistic), ("mlp", &self.mlp)] {
            if model.confusion.is_empty() {
                continue;
            }
            writeln!(f, "\n[{name}]")?;
            for (metric, field) in model.metrics.entries() {
                writeln!(f, "  {metric}: {}", field.text)?;
            }
            write_table(f, &model.confusion)?;
        }
        if !self.architecture.text.is_empty() {
            writeln!(f, "\n[architecture]\n{}", self.architecture.text)?;
        }
        for (name, table) in [("preview X", &self.preview_x), ("preview Y", &self.preview_y)] {
            if !table.is_empty() {
                writeln!(f, "\n[{name}]")?;
                write_table(f, table)?;
            }
        }
        for link in [&self.dataset_link, &self.results_link, &self.mlp_results_link] {
            if let Some(href) = &link.href {
                writeln!(f, "download: {href}")?;
            }
        }
        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &Table) -> fmt::Result {
    if !table.header.is_empty() {
        writeln!(f, "  {}", table.header.join(" | "))?;
    }
    for row in &table.body {
        match &row.label {
            Some(label) => writeln!(f, "  {label} | {}", row.cells.join(" | "))?,
            None => writeln!(f, "  {}", row.cells.join(" | "))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_dashboard_hides_results_and_error() {
        let dashboard = Dashboard::new();
        assert!(dashboard.results_hidden);
        assert!(!dashboard.error.is_visible());
        assert!(!dashboard.full_trigger.disabled);
        assert_eq!(dashboard.to_string(), "");
    }

    #[test]
    fn display_prints_error_and_skips_hidden_results() {
        let mut dashboard = Dashboard::new();
        dashboard.steps_hidden = false;
        dashboard.progress.mark_step_done(0);
        dashboard.error.set_text("⚠️ bad n");
        dashboard.error.show();
        dashboard.summary.rows.set_text("1000");

        let text = dashboard.to_string();
        assert!(text.starts_with("progress [#....] 20%"));
        assert!(text.contains("⚠️ bad n"));
        assert!(!text.contains("rows: 1000"));
    }
}
