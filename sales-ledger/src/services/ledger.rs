//! The sales ledger: records in catalog order, the edit protocol, and save.

use crate::models::{parse_count, Catalog, EditableField, SalesRecord};
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Log target of the events [`SalesLedger::save`] emits.
pub const SAVE_LOG_TARGET: &str = "sales_ledger::save";

/// What an edit did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The value was stored; the row's derived values were left alone.
    Committed {
        position: usize,
        field: EditableField,
    },
    /// The value was stored and the row's derived values recomputed.
    Recomputed { position: usize },
    /// Unrecognized field name, or no record to edit. Nothing changed.
    Ignored,
}

/// Sums over the stored derived values of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTotals {
    pub total_units_sold: i64,
    pub total_revenue: Decimal,
}

/// One session's worth of sales records.
///
/// Records are created once from the catalog and never added or removed.
/// Derived values only change through [`SalesLedger::recompute_record`],
/// which runs on a `finishPkgs` edit or on [`SalesLedger::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesLedger {
    records: Vec<SalesRecord>,
    price_per_unit: Decimal,
    packages_per_case: i64,
}

impl SalesLedger {
    /// Zero-valued record per catalog item, in catalog order.
    pub fn initialize(catalog: &Catalog) -> Self {
        let records = catalog
            .items()
            .iter()
            .map(|name| SalesRecord::new(name.as_str()))
            .collect();

        Self {
            records,
            price_per_unit: catalog.price_per_unit(),
            packages_per_case: catalog.packages_per_case(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    /// Row position from a raw `data-index` value. Malformed or out-of-range
    /// positions fall back to 0.
    pub fn resolve_position(&self, raw: &str) -> usize {
        let parsed = parse_count(raw);
        usize::try_from(parsed)
            .ok()
            .filter(|position| *position < self.records.len())
            .unwrap_or(0)
    }

    /// Applies one cell edit. The raw value is committed leniently (unparsable
    /// input becomes 0). Only a `finishPkgs` edit recomputes the row.
    pub fn on_field_edited(
        &mut self,
        raw_position: &str,
        raw_field: &str,
        raw_value: &str,
    ) -> EditOutcome {
        let field: EditableField = match raw_field.parse() {
            Ok(field) => field,
            Err(e) => {
                tracing::warn!(error = %e, raw_position, "Ignoring edit for unknown field");
                return EditOutcome::Ignored;
            }
        };

        let position = self.resolve_position(raw_position);
        let value = parse_count(raw_value);

        let Some(record) = self.records.get_mut(position) else {
            tracing::warn!(position, field = %field, "Ignoring edit: ledger has no records");
            return EditOutcome::Ignored;
        };
        record.set(field, value);

        let recomputed = field.triggers_recompute();
        let recomputed_label = if recomputed { "true" } else { "false" };
        counter!(
            "ledger_field_edits_total",
            "field" => field.as_str(),
            "recomputed" => recomputed_label
        )
        .increment(1);

        tracing::debug!(
            position,
            field = %field,
            value,
            item = record.item_name(),
            "Committed field edit"
        );

        if recomputed {
            self.recompute_record(position);
            EditOutcome::Recomputed { position }
        } else {
            EditOutcome::Committed { position, field }
        }
    }

    /// Rewrites one record's derived values from its inputs. Positions past
    /// the end are ignored.
    pub fn recompute_record(&mut self, position: usize) {
        let (packages_per_case, price_per_unit) = (self.packages_per_case, self.price_per_unit);
        if let Some(record) = self.records.get_mut(position) {
            record.recompute(packages_per_case, price_per_unit);
        }
    }

    /// Sums whatever derived values are stored, stale or not.
    pub fn aggregate_totals(&self) -> AggregateTotals {
        self.records.iter().fold(
            AggregateTotals {
                total_units_sold: 0,
                total_revenue: Decimal::ZERO,
            },
            |totals, record| AggregateTotals {
                total_units_sold: totals.total_units_sold + record.total_units_sold(),
                total_revenue: totals.total_revenue + record.revenue(),
            },
        )
    }

    /// Recomputes every record, then logs each one followed by the totals.
    /// The log events are the only output; nothing is persisted.
    pub fn save(&mut self) -> AggregateTotals {
        for position in 0..self.records.len() {
            self.recompute_record(position);
        }

        let totals = self.aggregate_totals();
        counter!("ledger_saves_total").increment(1);

        for (position, record) in self.records.iter().enumerate() {
            tracing::info!(
                target: SAVE_LOG_TARGET,
                position,
                item = record.item_name(),
                start_cases = record.start_cases,
                start_pkgs = record.start_pkgs,
                finish_cases = record.finish_cases,
                finish_pkgs = record.finish_pkgs,
                total_units_sold = record.total_units_sold(),
                revenue = %record.revenue(),
                "Saved record"
            );
        }

        tracing::info!(
            target: SAVE_LOG_TARGET,
            records = self.records.len(),
            total_units_sold = totals.total_units_sold,
            total_revenue = %totals.total_revenue,
            "Saving changes"
        );

        totals
    }
}
