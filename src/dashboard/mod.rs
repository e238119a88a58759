//! Analytics dashboard: four counters and two charts over the snapshot.

pub mod charts;

pub use charts::{Axis, Canvas, Chart, ChartKind};

use std::sync::Arc;
use tracing::{error, info};

use crate::api::{AnalyticsSnapshot, DocumentApi};
use crate::app::DocumentList;
use crate::ui::{format_file_size, Notifier};

/// Categories are a fixed set.
pub const CATEGORY_COUNT: usize = 6;

const CHART_WIDTH: usize = 30;

/// Summary counters shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCards {
    pub total_documents: u64,
    pub total_size: String,
    pub total_tags: usize,
    pub total_categories: usize,
}

impl Default for StatCards {
    fn default() -> Self {
        Self {
            total_documents: 0,
            total_size: format_file_size(0),
            total_tags: 0,
            total_categories: CATEGORY_COUNT,
        }
    }
}

pub struct Dashboard {
    api: Arc<dyn DocumentApi>,
    notifier: Arc<dyn Notifier>,
    top_tags_limit: usize,
    stats: StatCards,
    category_canvas: Canvas,
    tags_canvas: Canvas,
    // Snapshot behind the current render, for the extra breakdowns
    snapshot: Option<AnalyticsSnapshot>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DocumentApi>, notifier: Arc<dyn Notifier>, top_tags_limit: usize) -> Self {
        Self {
            api,
            notifier,
            top_tags_limit,
            stats: StatCards::default(),
            category_canvas: Canvas::new("categoryChart"),
            tags_canvas: Canvas::new("tagsChart"),
            snapshot: None,
        }
    }

    pub async fn init(&mut self) -> bool {
        self.load_analytics().await
    }

    /// Fetch the snapshot and redraw. Failures are reported, not returned.
    pub async fn load_analytics(&mut self) -> bool {
        match self.api.analytics().await {
            Ok(snapshot) => {
                self.update_stats(&snapshot);
                self.update_charts(&snapshot);
                self.snapshot = Some(snapshot);
                true
            }
            Err(e) => {
                error!(error = %e, "Error loading analytics");
                self.notifier.error("Failed to load analytics");
                false
            }
        }
    }

    /// Re-fetch analytics and the document list.
    pub async fn refresh(&mut self, list: &mut DocumentList) {
        self.notifier.info("Refreshing dashboard...");
        self.load_analytics().await;
        list.load().await;
        info!("dashboard refreshed");
        self.notifier.success("Dashboard updated!");
    }

    fn update_stats(&mut self, snapshot: &AnalyticsSnapshot) {
        self.stats = StatCards {
            total_documents: snapshot.total_documents,
            total_size: format_file_size(snapshot.total_size),
            total_tags: snapshot.top_tags.len(),
            total_categories: CATEGORY_COUNT,
        };
    }

    fn update_charts(&mut self, snapshot: &AnalyticsSnapshot) {
        self.category_canvas
            .mount(Chart::category_breakdown(&snapshot.categories));
        self.tags_canvas
            .mount(Chart::top_tags(&snapshot.top_tags, self.top_tags_limit));
    }

    pub fn stats(&self) -> &StatCards {
        &self.stats
    }

    pub fn category_canvas(&self) -> &Canvas {
        &self.category_canvas
    }

    pub fn tags_canvas(&self) -> &Canvas {
        &self.tags_canvas
    }

    pub fn snapshot(&self) -> Option<&AnalyticsSnapshot> {
        self.snapshot.as_ref()
    }

    /// Counters, both charts, and the timeline/type breakdowns when present.
    pub fn render_text(&self) -> String {
        let s = &self.stats;
        let mut out = format!(
            "Documents: {}   Size: {}   Tags: {}   Categories: {}\n",
            s.total_documents, s.total_size, s.total_tags, s.total_categories
        );

        out.push_str("\nBy category\n");
        match self.category_canvas.chart() {
            Some(chart) => out.push_str(&chart.render_text(CHART_WIDTH)),
            None => out.push_str("  (not loaded)\n"),
        }
        out.push_str("\nTop tags\n");
        match self.tags_canvas.chart() {
            Some(chart) => out.push_str(&chart.render_text(CHART_WIDTH)),
            None => out.push_str("  (not loaded)\n"),
        }

        if let Some(snapshot) = &self.snapshot {
            if !snapshot.documents_by_type.is_empty() {
                out.push_str("\nBy file type\n");
                for (file_type, count) in &snapshot.documents_by_type {
                    out.push_str(&format!("  {file_type:<8} {count}\n"));
                }
            }
            if !snapshot.timeline.is_empty() {
                out.push_str("\nUploads per day\n");
                for point in &snapshot.timeline {
                    out.push_str(&format!("  {}  {}\n", point.date, point.count));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::{CategoryCount, TagCount, TimelinePoint};
    use crate::app::list::Filters;
    use crate::ui::{Severity, ToastCenter};

    fn snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_documents: 4,
            total_size: 1_048_576,
            categories: vec![
                CategoryCount {
                    category: "Financeiro".into(),
                    count: 3,
                    percentage: Some(75.0),
                },
                CategoryCount {
                    category: "RH".into(),
                    count: 1,
                    percentage: Some(25.0),
                },
            ],
            top_tags: vec![TagCount {
                tag: "budget".into(),
                count: 2,
            }],
            timeline: vec![TimelinePoint {
                date: "2024-03-05".into(),
                count: 4,
            }],
            documents_by_type: [("pdf".to_string(), 4)].into_iter().collect(),
        }
    }

    fn dashboard(api: &Arc<FakeApi>, toasts: &ToastCenter) -> Dashboard {
        Dashboard::new(api.clone(), Arc::new(toasts.clone()), 10)
    }

    #[tokio::test]
    async fn load_updates_counters_and_charts() {
        let api = Arc::new(FakeApi::default());
        *api.snapshot.lock() = snapshot();
        let toasts = ToastCenter::default();
        let mut dash = dashboard(&api, &toasts);

        assert!(dash.load_analytics().await);
        assert_eq!(
            dash.stats(),
            &StatCards {
                total_documents: 4,
                total_size: "1 MB".into(),
                total_tags: 1,
                total_categories: 6,
            }
        );
        let chart = dash.category_canvas().chart().unwrap();
        assert_eq!(chart.tooltip(0).unwrap(), "Financeiro: 3 (75.0%)");

        let text = dash.render_text();
        assert!(text.contains("Documents: 4"));
        assert!(text.contains("budget"));
        assert!(text.contains("2024-03-05"));
        assert!(text.contains("pdf"));
    }

    #[tokio::test]
    async fn reload_destroys_previous_charts() {
        let api = Arc::new(FakeApi::default());
        let toasts = ToastCenter::default();
        let mut dash = dashboard(&api, &toasts);

        dash.load_analytics().await;
        dash.load_analytics().await;
        dash.load_analytics().await;
        assert_eq!(dash.category_canvas().destroyed(), 2);
        assert_eq!(dash.tags_canvas().destroyed(), 2);
    }

    #[tokio::test]
    async fn failure_notifies_and_keeps_state() {
        let api = Arc::new(FakeApi::default());
        api.fail("analytics");
        let toasts = ToastCenter::default();
        let mut dash = dashboard(&api, &toasts);

        assert!(!dash.load_analytics().await);
        assert_eq!(dash.stats(), &StatCards::default());
        assert!(dash.category_canvas().chart().is_none());
        assert_eq!(toasts.messages(Severity::Error), vec!["Failed to load analytics"]);
    }

    #[tokio::test]
    async fn refresh_reloads_analytics_then_documents() {
        let api = Arc::new(FakeApi::default());
        let toasts = ToastCenter::default();
        let notifier: Arc<dyn Notifier> = Arc::new(toasts.clone());
        let mut dash = Dashboard::new(api.clone(), notifier.clone(), 10);
        let mut list = DocumentList::new(api.clone(), notifier, Filters::default());

        dash.refresh(&mut list).await;

        use crate::api::fake::Call;
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Analytics);
        assert!(matches!(calls[1], Call::List(_)));
        assert_eq!(
            toasts.history(),
            vec![
                (Severity::Info, "Refreshing dashboard...".to_string()),
                (Severity::Success, "Dashboard updated!".to_string()),
            ]
        );
    }
}
