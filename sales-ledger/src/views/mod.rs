//! View models for the ledger page.
//!
//! Rows are built from ledger data and handed to the askama templates, which
//! lay out the seven input cells of each row in a fixed order:
//! item name, the four editable counts, units sold, revenue.

use crate::models::{EditableField, SalesRecord};
use crate::services::ledger::{AggregateTotals, SalesLedger};
use rust_decimal::Decimal;

/// Element ids the page and the fragment responses agree on.
pub mod ids {
    pub const FORM: &str = "cookieSalesForm";
    pub const TABLE_BODY: &str = "cookieSalesBody";
    pub const TOTAL_UNITS: &str = "totalPkgsSold";
    pub const TOTAL_REVENUE: &str = "totalRevenue";

    pub fn row_units(position: usize) -> String {
        format!("units-{}", position)
    }

    pub fn row_revenue(position: usize) -> String {
        format!("revenue-{}", position)
    }
}

/// Two decimal places, as shown in revenue cells and totals.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableCellView {
    pub field: &'static str,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub position: usize,
    pub item_name: String,
    pub editable: Vec<EditableCellView>,
    pub total_units_sold: i64,
    pub revenue: String,
    pub units_id: String,
    pub revenue_id: String,
}

impl RowView {
    pub fn new(position: usize, record: &SalesRecord) -> Self {
        Self {
            position,
            item_name: record.item_name().to_string(),
            editable: EditableField::ALL
                .into_iter()
                .map(|field| EditableCellView {
                    field: field.as_str(),
                    value: record.get(field),
                })
                .collect(),
            total_units_sold: record.total_units_sold(),
            revenue: format_money(record.revenue()),
            units_id: ids::row_units(position),
            revenue_id: ids::row_revenue(position),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub total_units_sold: i64,
    pub total_revenue: String,
}

impl From<AggregateTotals> for TotalsView {
    fn from(totals: AggregateTotals) -> Self {
        Self {
            total_units_sold: totals.total_units_sold,
            total_revenue: format_money(totals.total_revenue),
        }
    }
}

/// Everything a full render needs: one row per record, in record order, plus
/// the aggregate totals over the stored derived values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerView {
    pub rows: Vec<RowView>,
    pub totals: TotalsView,
}

impl LedgerView {
    pub fn build(ledger: &SalesLedger) -> Self {
        Self {
            rows: rows(ledger),
            totals: ledger.aggregate_totals().into(),
        }
    }
}

pub fn rows(ledger: &SalesLedger) -> Vec<RowView> {
    ledger
        .records()
        .iter()
        .enumerate()
        .map(|(position, record)| RowView::new(position, record))
        .collect()
}
