pub mod output;
pub mod progress;
pub mod prompt;

pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
pub use prompt::prompt_imsi;
