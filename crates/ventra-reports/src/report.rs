//! Report aggregation over a date range.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ventra_core::error::DomainError;
use ventra_core::identity::Requester;
use ventra_core::money::Money;
use ventra_sales::domain::repository::SaleRepository;
use ventra_sales::domain::sale::Sale;

/// An inclusive `[start, end]` reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    /// Start of the window, inclusive.
    pub start: DateTime<Utc>,
    /// End of the window, inclusive.
    pub end: DateTime<Utc>,
}

impl ReportRange {
    /// Validates that the window is not inverted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::Validation(
                "report range start must not be after end".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }
}

/// Aggregated report over the selected sales.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    /// Selected sales, newest first.
    pub sales: Vec<Sale>,
    /// Σ total over the selected sales.
    pub total_amount: Money,
    /// Number of selected sales.
    pub count: usize,
}

/// Sums the selected sales into a report.
#[must_use]
pub fn build_report(sales: Vec<Sale>) -> SalesReport {
    let total_amount = sales.iter().map(|sale| sale.total).sum();
    let count = sales.len();
    SalesReport {
        sales,
        total_amount,
        count,
    }
}

/// Selects sales with `created_at` in the range, scoped to the requester's
/// own sales unless they are an Administrator, and aggregates them.
///
/// # Errors
///
/// Returns `Infrastructure` on persistence failure.
pub async fn handle_sales_report(
    requester: &Requester,
    range: ReportRange,
    repo: &dyn SaleRepository,
) -> Result<SalesReport, DomainError> {
    let scope = if requester.is_administrator() {
        None
    } else {
        Some(requester.user_id)
    };
    let sales = repo
        .find_by_date_range(range.start, range.end, scope)
        .await?;
    Ok(build_report(sales))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use uuid::Uuid;
    use ventra_core::identity::Role;
    use ventra_test_support::FixedClock;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    fn sale(seller_id: Uuid, day: u32, total_cents: i64) -> Sale {
        let mut sale = Sale::new(seller_id, Vec::new(), &FixedClock(at(day)));
        sale.total = Money::from_cents(total_cents);
        sale
    }

    /// Minimal repository over a fixed set of sales.
    #[derive(Debug, Default)]
    struct FixedSales {
        sales: Mutex<HashMap<Uuid, Sale>>,
    }

    impl FixedSales {
        fn with(sales: Vec<Sale>) -> Self {
            Self {
                sales: Mutex::new(sales.into_iter().map(|s| (s.id, s)).collect()),
            }
        }
    }

    #[async_trait]
    impl SaleRepository for FixedSales {
        async fn insert(&self, sale: &Sale) -> Result<(), DomainError> {
            self.sales.lock().unwrap().insert(sale.id, sale.clone());
            Ok(())
        }

        async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
            self.sales.lock().unwrap().insert(sale.id, sale.clone());
            Ok(())
        }

        async fn delete(&self, sale_id: Uuid) -> Result<(), DomainError> {
            self.sales.lock().unwrap().remove(&sale_id);
            Ok(())
        }

        async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<Sale>, DomainError> {
            Ok(self.sales.lock().unwrap().get(&sale_id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Sale>, DomainError> {
            Ok(self.sales.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Sale>, DomainError> {
            Ok(self
                .sales
                .lock()
                .unwrap()
                .values()
                .filter(|sale| sale.seller_id == seller_id)
                .cloned()
                .collect())
        }

        async fn find_by_date_range(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            seller_id: Option<Uuid>,
        ) -> Result<Vec<Sale>, DomainError> {
            let mut sales: Vec<Sale> = self
                .sales
                .lock()
                .unwrap()
                .values()
                .filter(|sale| sale.created_at >= start && sale.created_at <= end)
                .filter(|sale| seller_id.is_none_or(|id| sale.seller_id == id))
                .cloned()
                .collect();
            sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(sales)
        }
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = ReportRange::new(at(10), at(5)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_single_instant_range_is_valid() {
        assert!(ReportRange::new(at(10), at(10)).is_ok());
    }

    #[test]
    fn test_build_report_sums_totals_and_counts() {
        let seller = Uuid::new_v4();
        let report = build_report(vec![sale(seller, 1, 2500), sale(seller, 2, 500)]);

        assert_eq!(report.total_amount, Money::from_cents(3000));
        assert_eq!(report.count, 2);
    }

    #[test]
    fn test_empty_report_is_zero() {
        let report = build_report(Vec::new());

        assert_eq!(report.total_amount, Money::zero());
        assert_eq!(report.count, 0);
    }

    #[tokio::test]
    async fn test_report_scopes_to_requester_unless_administrator() {
        // Arrange
        let seller_id = Uuid::new_v4();
        let repo = FixedSales::with(vec![
            sale(seller_id, 5, 1000),
            sale(Uuid::new_v4(), 6, 2000),
            // Outside the range.
            sale(seller_id, 20, 4000),
        ]);
        let range = ReportRange::new(at(1), at(10)).unwrap();
        let seller = Requester {
            user_id: seller_id,
            name: "seller".to_owned(),
            role: Role::Seller,
        };
        let admin = Requester {
            user_id: Uuid::new_v4(),
            name: "admin".to_owned(),
            role: Role::Administrator,
        };

        // Act
        let own = handle_sales_report(&seller, range, &repo).await.unwrap();
        let all = handle_sales_report(&admin, range, &repo).await.unwrap();

        // Assert
        assert_eq!(own.count, 1);
        assert_eq!(own.total_amount, Money::from_cents(1000));
        assert_eq!(all.count, 2);
        assert_eq!(all.total_amount, Money::from_cents(3000));
        // Newest first.
        assert!(all.sales[0].created_at > all.sales[1].created_at);
    }
}
