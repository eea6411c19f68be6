pub mod output_manager;
pub mod record_extractor;
pub mod records;

pub use output_manager::{run_timestamp, sanitize_file_component, OutputManager};
pub use record_extractor::{RecordExtractor, ScanProgress, RECORD_TERMINATOR};
pub use records::{
    display_value, ExtractionSet, OptGprsData, RecordKind, SubData, SubscriberData, NOT_AVAILABLE,
};
