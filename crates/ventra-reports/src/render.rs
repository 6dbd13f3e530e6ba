//! Rendering seam for sales reports.

use async_trait::async_trait;

use ventra_core::error::DomainError;
use ventra_core::identity::Requester;

use crate::report::{ReportRange, SalesReport};

/// A collaborator that turns a report into an opaque byte stream (a PDF, an
/// HTML page, whatever the deployment wires in). Rendering failures surface
/// as `DomainError::Render` and are never retried.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Renders the report for the given requester and range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Render` when the backend fails; no partial
    /// output is returned.
    async fn render(
        &self,
        report: &SalesReport,
        requester: &Requester,
        range: &ReportRange,
    ) -> Result<Vec<u8>, DomainError>;

    /// Content type of the rendered bytes.
    fn content_type(&self) -> &'static str;
}

/// Renders the report as a self-contained HTML document. A deployment that
/// needs PDFs feeds this markup to a headless-browser backend; that
/// conversion is outside this system.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReportRenderer;

#[async_trait]
impl ReportRenderer for HtmlReportRenderer {
    async fn render(
        &self,
        report: &SalesReport,
        requester: &Requester,
        range: &ReportRange,
    ) -> Result<Vec<u8>, DomainError> {
        let mut rows = String::new();
        for sale in &report.sales {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                sale.id,
                sale.created_at.format("%Y-%m-%d %H:%M"),
                sale.line_items.len(),
                sale.total,
            ));
        }

        let html = format!(
            "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
             <title>Sales report</title></head><body>\n\
             <h1>Sales report</h1>\n\
             <p>Requested by {requester_name} ({role}) for {start} – {end}</p>\n\
             <table>\n\
             <thead><tr><th>Sale</th><th>Date</th><th>Lines</th><th>Total</th></tr></thead>\n\
             <tbody>\n{rows}</tbody>\n\
             </table>\n\
             <p>Sales: {count} — Total: {total}</p>\n\
             </body></html>\n",
            requester_name = requester.name,
            role = requester.role,
            start = range.start.format("%Y-%m-%d"),
            end = range.end.format("%Y-%m-%d"),
            count = report.count,
            total = report.total_amount,
        );

        Ok(html.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;
    use ventra_core::identity::Role;
    use ventra_core::money::Money;
    use ventra_sales::domain::sale::Sale;
    use ventra_test_support::FixedClock;

    use crate::report::build_report;

    use super::*;

    #[tokio::test]
    async fn test_html_renderer_includes_totals_and_requester() {
        // Arrange
        let created = Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap();
        let mut sale = Sale::new(Uuid::new_v4(), Vec::new(), &FixedClock(created));
        sale.total = Money::from_cents(2500);
        let report = build_report(vec![sale]);
        let requester = Requester {
            user_id: Uuid::new_v4(),
            name: "Ana".to_owned(),
            role: Role::Administrator,
        };
        let range = ReportRange::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap(),
        )
        .unwrap();

        // Act
        let bytes = HtmlReportRenderer
            .render(&report, &requester, &range)
            .await
            .unwrap();
        let html = String::from_utf8(bytes).unwrap();

        // Assert
        assert!(html.contains("Ana"));
        assert!(html.contains("25.00"));
        assert!(html.contains("Sales: 1"));
        assert!(html.contains("2026-03-01"));
    }

    #[test]
    fn test_content_type_is_html() {
        assert_eq!(
            HtmlReportRenderer.content_type(),
            "text/html; charset=utf-8"
        );
    }
}
