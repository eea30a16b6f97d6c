pub mod ledger;

pub use ledger::{AggregateTotals, EditOutcome, SalesLedger};
