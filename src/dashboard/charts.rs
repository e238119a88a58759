use tracing::debug;

use crate::api::{CategoryCount, TagCount};
use crate::ui::category_color;

const BAR_COLOR: &str = "rgba(99, 102, 241, 0.8)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
}

/// Value axis settings for bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub begin_at_zero: bool,
    pub step: u64,
}

/// Render-ready chart model: one dataset, labeled values.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
    pub y_axis: Option<Axis>,
}

impl Chart {
    /// Doughnut of document counts per category.
    pub fn category_breakdown(categories: &[CategoryCount]) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            labels: categories.iter().map(|c| c.category.clone()).collect(),
            values: categories.iter().map(|c| c.count).collect(),
            colors: categories
                .iter()
                .map(|c| category_color(&c.category).to_string())
                .collect(),
            y_axis: None,
        }
    }

    /// Bar chart of the `limit` most used tags, integer-stepped from zero.
    /// Ties keep their input order.
    pub fn top_tags(tags: &[TagCount], limit: usize) -> Self {
        let mut sorted: Vec<&TagCount> = tags.iter().collect();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        let top = &sorted[..sorted.len().min(limit)];
        Self {
            kind: ChartKind::Bar,
            labels: top.iter().map(|t| t.tag.clone()).collect(),
            values: top.iter().map(|t| t.count).collect(),
            colors: vec![BAR_COLOR.to_string(); top.len()],
            y_axis: Some(Axis {
                begin_at_zero: true,
                step: 1,
            }),
        }
    }

    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Share of the dataset total, in percent.
    pub fn percentage(&self, index: usize) -> Option<f64> {
        let value = *self.values.get(index)?;
        let total = self.total();
        if total == 0 {
            return Some(0.0);
        }
        Some(value as f64 / total as f64 * 100.0)
    }

    /// Tooltip text for one data point.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let value = *self.values.get(index)?;
        match self.kind {
            ChartKind::Doughnut => {
                let label = self.labels.get(index).map(String::as_str).unwrap_or("");
                let pct = self.percentage(index)?;
                Some(format!("{label}: {value} ({pct:.1}%)"))
            }
            ChartKind::Bar => Some(format!("Used {value} times")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Plain-text rendering for the terminal.
    pub fn render_text(&self, width: usize) -> String {
        if self.is_empty() {
            return "  (no data)\n".to_string();
        }
        let label_width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        match self.kind {
            ChartKind::Doughnut => {
                for (i, label) in self.labels.iter().enumerate() {
                    let pct = self.percentage(i).unwrap_or(0.0);
                    let cells = ((pct / 100.0) * width as f64).round() as usize;
                    out.push_str(&format!(
                        "  {label:<label_width$}  {:<width$}  {} ({pct:.1}%)\n",
                        "●".repeat(cells),
                        self.values[i],
                    ));
                }
            }
            ChartKind::Bar => {
                let max = self.values.iter().copied().max().unwrap_or(0).max(1);
                for (i, label) in self.labels.iter().enumerate() {
                    let cells = (self.values[i] as f64 / max as f64 * width as f64).round() as usize;
                    out.push_str(&format!(
                        "  {label:<label_width$}  {:<width$}  {}\n",
                        "█".repeat(cells),
                        self.values[i],
                    ));
                }
            }
        }
        out
    }

    fn destroy(self, canvas: &str) {
        debug!(canvas, kind = ?self.kind, points = self.values.len(), "chart destroyed");
    }
}

/// A render target that owns at most one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub name: &'static str,
    chart: Option<Chart>,
    destroyed: usize,
}

impl Canvas {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            chart: None,
            destroyed: 0,
        }
    }

    /// Bind `chart`, destroying the one previously bound.
    pub fn mount(&mut self, chart: Chart) -> &Chart {
        if let Some(previous) = self.chart.take() {
            previous.destroy(self.name);
            self.destroyed += 1;
        }
        self.chart.insert(chart)
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    /// Number of charts torn down on this canvas.
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }
}
