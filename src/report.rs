//! Outbound report documents.
//!
//! Rendering is a pure function of the aggregate and timestamp; delivery is
//! best-effort through the [`ReportSink`] port and a failed post never
//! re-triggers the underlying run.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::domain::{CurationReport, TradeReport};
use crate::error::Result;

/// Hard cap on individual line items in a document.
const ITEM_CAP: usize = 25;

const TRADE_COLOR: u32 = 0x2ecc71;
const CURATION_COLOR: u32 = 0x3498db;

/// One free-text field of a report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentField {
    pub name: String,
    pub value: String,
}

impl DocumentField {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fixed-shape outbound document: header, totals, rarity breakdown, capped
/// item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub color: u32,
    pub fields: Vec<DocumentField>,
    pub timestamp: DateTime<Utc>,
    pub footer: Option<String>,
}

/// Render a trade aggregate. `None` when nothing was sent.
#[must_use]
pub fn render_trade(report: &TradeReport, at: DateTime<Utc>) -> Option<ReportDocument> {
    if report.total_sent() == 0 {
        return None;
    }

    let mut totals = format!("{} items sent to {}", report.total_sent(), report.target);
    if report.cancelled {
        totals.push_str(" (run cancelled early)");
    }

    Some(ReportDocument {
        title: format!("Trade run complete: {}", report.target),
        color: TRADE_COLOR,
        fields: vec![
            DocumentField::new("Totals", totals),
            DocumentField::new("Breakdown", breakdown_lines(report.breakdown())),
            DocumentField::new("Items", item_lines(report.sent_names())),
        ],
        timestamp: at,
        footer: Some(format!("run {}", report.run_id)),
    })
}

/// Render a curation aggregate. `None` when nothing was marked.
#[must_use]
pub fn render_curation(report: &CurationReport, at: DateTime<Utc>) -> Option<ReportDocument> {
    if report.total_marked() == 0 {
        return None;
    }

    Some(ReportDocument {
        title: "Auto-favorite sweep".into(),
        color: CURATION_COLOR,
        fields: vec![
            DocumentField::new(
                "Totals",
                format!(
                    "{} items marked at {} and above",
                    report.total_marked(),
                    report.threshold.label()
                ),
            ),
            DocumentField::new("Breakdown", breakdown_lines(report.breakdown())),
            DocumentField::new("Items", item_lines(report.marked_names())),
        ],
        timestamp: at,
        footer: None,
    })
}

fn breakdown_lines(
    breakdown: impl Iterator<Item = (crate::domain::Rarity, u32)>,
) -> String {
    let lines: Vec<String> = breakdown
        .map(|(rarity, count)| format!("{}: {}", rarity.label(), count))
        .collect();
    lines.join("\n")
}

fn item_lines(names: &[String]) -> String {
    let mut lines: Vec<String> = names.iter().take(ITEM_CAP).cloned().collect();
    if names.len() > ITEM_CAP {
        lines.push(format!("+{} more", names.len() - ITEM_CAP));
    }
    lines.join("\n")
}

/// Outbound sink for report documents.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Deliver a document. The caller treats failure as non-fatal.
    async fn post(&self, document: &ReportDocument) -> Result<()>;
}

/// A sink that drops every document, for when no webhook is configured.
pub struct NullSink;

#[async_trait]
impl ReportSink for NullSink {
    async fn post(&self, _document: &ReportDocument) -> Result<()> {
        Ok(())
    }
}

/// Formats aggregates and hands them to the configured sink.
pub struct ReportEmitter {
    sink: Arc<dyn ReportSink>,
}

impl ReportEmitter {
    #[must_use]
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink }
    }

    /// Emit a trade report. No-ops on zero sent items.
    pub async fn emit_trade(&self, report: &TradeReport) {
        if let Some(document) = render_trade(report, Utc::now()) {
            self.deliver(document).await;
        }
    }

    /// Emit a curation report. No-ops on zero marked items.
    pub async fn emit_curation(&self, report: &CurationReport) {
        if let Some(document) = render_curation(report, Utc::now()) {
            self.deliver(document).await;
        }
    }

    async fn deliver(&self, document: ReportDocument) {
        if let Err(err) = self.sink.post(&document).await {
            warn!(error = %err, title = %document.title, "Report delivery failed");
        }
    }
}
