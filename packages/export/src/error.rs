use pulse_compiler_email::EmailError;
use pulse_compiler_html::CompileError;
use pulse_schema::SchemaError;
use pulse_theme::ThemeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Build directory not found: {}. Build the app first, then export again.", .0.display())]
    MissingBuild(PathBuf),

    #[error("Issue file not found: {}. Save or export the issue JSON first.", .0.display())]
    MissingIssue(PathBuf),

    #[error("Could not find a {ext} file in {}", .dir.display())]
    MissingAsset { dir: PathBuf, ext: String },

    #[error("HTML compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("Email compilation failed: {0}")]
    Email(#[from] EmailError),

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Invalid issue: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Export error: {0}")]
    Generic(String),
}

impl From<String> for ExportError {
    fn from(s: String) -> Self {
        ExportError::Generic(s)
    }
}

impl From<&str> for ExportError {
    fn from(s: &str) -> Self {
        ExportError::Generic(s.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
