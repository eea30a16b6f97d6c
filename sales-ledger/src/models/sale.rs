//! Per-item sales record and the editable field selector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One catalog item's inventory counts and derived sales figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    item_name: String,
    pub start_cases: i64,
    pub start_pkgs: i64,
    pub finish_cases: i64,
    pub finish_pkgs: i64,
    total_units_sold: i64,
    revenue: Decimal,
}

impl SalesRecord {
    /// Zero-valued record for a catalog entry.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            start_cases: 0,
            start_pkgs: 0,
            finish_cases: 0,
            finish_pkgs: 0,
            total_units_sold: 0,
            revenue: Decimal::ZERO,
        }
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Units sold as of the last recompute.
    pub fn total_units_sold(&self) -> i64 {
        self.total_units_sold
    }

    /// Revenue as of the last recompute.
    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    pub fn get(&self, field: EditableField) -> i64 {
        match field {
            EditableField::StartCases => self.start_cases,
            EditableField::StartPkgs => self.start_pkgs,
            EditableField::FinishCases => self.finish_cases,
            EditableField::FinishPkgs => self.finish_pkgs,
        }
    }

    pub fn set(&mut self, field: EditableField, value: i64) {
        match field {
            EditableField::StartCases => self.start_cases = value,
            EditableField::StartPkgs => self.start_pkgs = value,
            EditableField::FinishCases => self.finish_cases = value,
            EditableField::FinishPkgs => self.finish_pkgs = value,
        }
    }

    /// Rewrites the derived fields from the current inputs. Negative results
    /// are kept as-is.
    pub fn recompute(&mut self, packages_per_case: i64, price_per_unit: Decimal) {
        let start_total = self.start_cases * packages_per_case + self.start_pkgs;
        let finish_total = self.finish_cases * packages_per_case + self.finish_pkgs;
        self.total_units_sold = start_total - finish_total;
        self.revenue = Decimal::from(self.total_units_sold) * price_per_unit;
    }
}

/// The four user-editable inventory counts, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditableField {
    StartCases,
    StartPkgs,
    FinishCases,
    FinishPkgs,
}

impl EditableField {
    pub const ALL: [EditableField; 4] = [
        EditableField::StartCases,
        EditableField::StartPkgs,
        EditableField::FinishCases,
        EditableField::FinishPkgs,
    ];

    /// Name used in `data-field` attributes and edit requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartCases => "startCases",
            Self::StartPkgs => "startPkgs",
            Self::FinishCases => "finishCases",
            Self::FinishPkgs => "finishPkgs",
        }
    }

    /// Whether committing this field recomputes its row.
    pub fn triggers_recompute(&self) -> bool {
        matches!(self, Self::FinishPkgs)
    }
}

impl std::fmt::Display for EditableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown editable field: {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for EditableField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startCases" => Ok(Self::StartCases),
            "startPkgs" => Ok(Self::StartPkgs),
            "finishCases" => Ok(Self::FinishCases),
            "finishPkgs" => Ok(Self::FinishPkgs),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Lenient integer parse for raw input values: leading whitespace, an optional
/// sign, then as many digits as are present. Anything else after the digits is
/// ignored, so `"3.9"` is 3 and `"12abc"` is 12. No digits, or a value outside
/// the `i32` range, yields 0.
///
/// Counts are bounded to `i32` and widened, so row and ledger arithmetic in
/// `i64` cannot overflow.
pub fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let sign_len = match trimmed.as_bytes().first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };

    let digits_end = trimmed[sign_len..]
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len() - sign_len);

    trimmed[..sign_len + digits_end]
        .parse::<i32>()
        .map(i64::from)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_PACKAGES_PER_CASE;
    use rust_decimal_macros::dec;

    fn record(sc: i64, sp: i64, fc: i64, fp: i64) -> SalesRecord {
        let mut record = SalesRecord::new("Trefoils");
        record.start_cases = sc;
        record.start_pkgs = sp;
        record.finish_cases = fc;
        record.finish_pkgs = fp;
        record
    }

    #[test]
    fn test_recompute_counts_cases_as_twelve_packages() {
        let mut r = record(2, 3, 1, 5);
        r.recompute(12, dec!(6.00));
        assert_eq!(r.total_units_sold(), 10);
        assert_eq!(r.revenue(), dec!(60.00));
    }

    #[test]
    fn test_recompute_allows_negative_results() {
        let mut r = record(0, 1, 1, 0);
        r.recompute(12, dec!(6.00));
        assert_eq!(r.total_units_sold(), -11);
        assert_eq!(r.revenue(), dec!(-66.00));
    }

    #[test]
    fn test_recompute_is_exact_for_many_inputs() {
        for (sc, sp, fc, fp) in [(0, 0, 0, 0), (5, 11, 0, 7), (3, 0, 3, 0), (1, 0, 0, 13)] {
            let mut r = record(sc, sp, fc, fp);
            r.recompute(12, dec!(6.00));
            let expected = (sc * 12 + sp) - (fc * 12 + fp);
            assert_eq!(r.total_units_sold(), expected);
            assert_eq!(r.revenue(), Decimal::from(expected) * dec!(6.00));
        }
    }

    #[test]
    fn test_set_and_get_each_field() {
        let mut r = SalesRecord::new("Samoas");
        for (i, field) in EditableField::ALL.into_iter().enumerate() {
            r.set(field, i as i64 + 1);
        }
        assert_eq!(
            (r.start_cases, r.start_pkgs, r.finish_cases, r.finish_pkgs),
            (1, 2, 3, 4)
        );
        assert_eq!(r.get(EditableField::FinishCases), 3);
    }

    #[test]
    fn test_set_does_not_touch_derived_values() {
        let mut r = SalesRecord::new("Samoas");
        r.set(EditableField::StartCases, 4);
        assert_eq!(r.total_units_sold(), 0);
        assert_eq!(r.revenue(), Decimal::ZERO);
    }

    #[test]
    fn test_field_names_parse() {
        for field in EditableField::ALL {
            assert_eq!(field.as_str().parse::<EditableField>(), Ok(field));
        }
        assert!("revenue".parse::<EditableField>().is_err());
        assert!("StartCases".parse::<EditableField>().is_err());
    }

    #[test]
    fn test_only_finish_pkgs_triggers_recompute() {
        let triggering: Vec<_> = EditableField::ALL
            .into_iter()
            .filter(EditableField::triggers_recompute)
            .collect();
        assert_eq!(triggering, vec![EditableField::FinishPkgs]);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count("  7"), 7);
        assert_eq!(parse_count("-3"), -3);
        assert_eq!(parse_count("+5"), 5);
        assert_eq!(parse_count("3.9"), 3);
        assert_eq!(parse_count("12abc"), 12);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("99999999999999999999999"), 0);
        assert_eq!(parse_count("+-5"), 0);
    }

    #[test]
    fn test_parse_count_bounds() {
        assert_eq!(parse_count("2147483647"), i64::from(i32::MAX));
        assert_eq!(parse_count("-2147483648"), i64::from(i32::MIN));
        assert_eq!(parse_count("2147483648"), 0);
        assert_eq!(parse_count("9223372036854775807"), 0);
    }

    #[test]
    fn test_recompute_at_count_limits() {
        let (max, min) = (i64::from(i32::MAX), i64::from(i32::MIN));
        let mut r = record(max, max, min, min);
        r.recompute(MAX_PACKAGES_PER_CASE, dec!(6.00));

        let expected = (max * MAX_PACKAGES_PER_CASE + max) - (min * MAX_PACKAGES_PER_CASE + min);
        assert_eq!(r.total_units_sold(), expected);
        assert_eq!(r.revenue(), Decimal::from(expected) * dec!(6.00));
    }

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(SalesRecord::new("Thin Mints")).unwrap();
        assert_eq!(value["itemName"], "Thin Mints");
        assert_eq!(value["finishPkgs"], 0);
        assert!(value.get("totalUnitsSold").is_some());
    }
}
