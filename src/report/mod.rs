pub mod comparison;
pub mod csv_export;

pub use comparison::{ComparisonReport, ComparisonSummary, FieldComparison, PairwiseComparator};
pub use csv_export::{BulkExporter, ExportSummary};
