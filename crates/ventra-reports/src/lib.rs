//! Ventra — sales report aggregation.
//!
//! Filters sales by date range and requester scope, sums totals, and hands
//! the result to a rendering collaborator. Rendering backends (headless
//! browser, direct drawing) are external; this crate only defines the seam
//! and a plain HTML document renderer.

pub mod render;
pub mod report;

pub use render::{HtmlReportRenderer, ReportRenderer};
pub use report::{ReportRange, SalesReport, handle_sales_report};
