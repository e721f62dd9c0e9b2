use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "frontend/src/data";
pub const DEFAULT_OUTPUT_DIR: &str = "backend/migration/output";
pub const DEFAULT_EXTENSION: &str = ".ts";
pub const DEFAULT_SCHEMA_FILE: &str = "schema.sql";
pub const DEFAULT_INSERTS_FILE: &str = "inserts.sql";

/// how a run treats a source file that cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// abort on the first error and write nothing
    #[default]
    FailFast,
    /// record the failure, keep converting the remaining files
    SkipInvalid,
}

/// everything an extraction run needs to know about its surroundings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// directory scanned (non-recursively) for source data files
    pub input_dir: PathBuf,
    /// directory receiving the generated scripts; created when missing
    pub output_dir: PathBuf,
    /// file name suffix selecting source data files, e.g. `.ts`
    pub extension: String,
    pub schema_file: String,
    pub inserts_file: String,
    pub failure_policy: FailurePolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            schema_file: DEFAULT_SCHEMA_FILE.to_string(),
            inserts_file: DEFAULT_INSERTS_FILE.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ExtractConfig {
    pub fn schema_path(&self) -> PathBuf {
        self.output_dir.join(&self.schema_file)
    }

    pub fn inserts_path(&self) -> PathBuf {
        self.output_dir.join(&self.inserts_file)
    }
}
