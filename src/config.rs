use std::path::PathBuf;

use clap::Parser;

use crate::core::approval::ApprovalSet;
use crate::core::format::DocumentFormat;
use crate::core::form::RootOrder;
use crate::source::DocumentSource;

const DEFAULT_SOURCE: &str = "data.json";
const LOG_FILE_NAME: &str = "jsonform.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "jsonform")]
#[command(about = "Edit a JSON or YAML document as a form, limited to approved paths")]
pub struct Config {
    /// File path or http(s) URL of the document to edit
    #[arg(default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Format of the raw text pane [default: guessed from SOURCE]
    #[arg(short, long, value_enum)]
    pub format: Option<DocumentFormat>,

    /// Approval pattern (`*` or a dotted path); repeat for more
    #[arg(short, long = "approve", value_name = "PATTERN")]
    pub approvals: Vec<String>,

    /// List top-level fields before top-level sections
    #[arg(long)]
    pub fields_first: bool,

    /// Where log output goes; the terminal belongs to the UI
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn document_source(&self) -> DocumentSource {
        DocumentSource::parse(&self.source)
    }

    pub fn initial_format(&self) -> DocumentFormat {
        self.format
            .unwrap_or_else(|| self.document_source().format())
    }

    pub fn approval_set(&self) -> ApprovalSet {
        ApprovalSet::from_selection(self.approvals.iter().cloned())
    }

    pub fn root_order(&self) -> RootOrder {
        if self.fields_first {
            RootOrder::FieldsFirst
        } else {
            RootOrder::Document
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
    }
}
