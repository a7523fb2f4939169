//! Folder selection capability.
//!
//! The application asks a [`FolderPicker`] for a folder and gets back a path
//! or a [`PickError`]. How the folder is chosen is up to the implementation:
//!
//! | Picker | Source |
//! |---|---|
//! | [`PromptPicker`] | a line typed at a terminal prompt |
//! | [`FixedPicker`] | a path known up front (CLI argument, drag and drop) |
//! | `NativePicker` | the OS folder dialog, with the `native-dialog` feature |
//!
//! The manifest builder never sees a picker; it takes a plain path.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickError {
    #[error("User cancelled folder selection")]
    Cancelled,
    #[error("No folder selected")]
    NoSelection,
    #[error("Not a folder: {0}")]
    NotAFolder(PathBuf),
    #[error("Folder picker failed: {0}")]
    Io(#[from] io::Error),
}

impl PickError {
    /// Stable error code sent back to the application layer.
    pub fn code(&self) -> &'static str {
        match self {
            PickError::Cancelled => "CANCELLED",
            PickError::NoSelection => "NO_URL",
            PickError::NotAFolder(_) => "NOT_A_FOLDER",
            PickError::Io(_) => "PICKER_FAILED",
        }
    }
}

/// Texts shown by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    /// Explanation shown above the chooser.
    pub message: String,
    /// Label of the confirm action.
    pub prompt: String,
}

impl From<&crate::config::PickerConfig> for PickRequest {
    fn from(config: &crate::config::PickerConfig) -> Self {
        Self {
            message: config.message.clone(),
            prompt: config.prompt.clone(),
        }
    }
}

/// Something that can ask the user for a single folder.
///
/// Implementations may block until the user answers; callers that need to
/// stay responsive run them off their main thread (see
/// [`spawn_pick_folder`](crate::bridge::spawn_pick_folder)).
pub trait FolderPicker {
    fn pick(&mut self, request: &PickRequest) -> Result<PathBuf, PickError>;
}

impl<P: FolderPicker + ?Sized> FolderPicker for Box<P> {
    fn pick(&mut self, request: &PickRequest) -> Result<PathBuf, PickError> {
        (**self).pick(request)
    }
}

/// Always answers with the same folder.
#[derive(Debug, Clone)]
pub struct FixedPicker {
    path: PathBuf,
}

impl FixedPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FolderPicker for FixedPicker {
    fn pick(&mut self, _request: &PickRequest) -> Result<PathBuf, PickError> {
        Ok(self.path.clone())
    }
}

/// Reads a folder path from a line of input.
///
/// An empty line or end of input counts as cancelling. Relative paths are
/// made absolute against the current directory.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptPicker<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr so stdout stays clean for results.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> FolderPicker for PromptPicker<R, W> {
    fn pick(&mut self, request: &PickRequest) -> Result<PathBuf, PickError> {
        writeln!(self.output, "{}", request.message)?;
        write!(self.output, "{}: ", request.prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PickError::Cancelled);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Err(PickError::Cancelled);
        }

        let path = std::path::absolute(Path::new(answer))?;
        if !path.is_dir() {
            return Err(PickError::NotAFolder(path));
        }
        Ok(path)
    }
}

/// The OS folder dialog.
#[cfg(feature = "native-dialog")]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePicker;

#[cfg(feature = "native-dialog")]
impl FolderPicker for NativePicker {
    fn pick(&mut self, request: &PickRequest) -> Result<PathBuf, PickError> {
        rfd::FileDialog::new()
            .set_title(request.message.as_str())
            .pick_folder()
            .ok_or(PickError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request() -> PickRequest {
        PickRequest {
            message: "Select a folder".to_string(),
            prompt: "Open".to_string(),
        }
    }

    #[test]
    fn prompt_reads_folder_path() {
        let tmp = TempDir::new().unwrap();
        let input = format!("{}\n", tmp.path().display());
        let mut out = Vec::new();

        let picked = PromptPicker::new(input.as_bytes(), &mut out)
            .pick(&request())
            .unwrap();

        assert_eq!(picked, tmp.path());
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown, "Select a folder\nOpen: ");
    }

    #[test]
    fn prompt_trims_whitespace() {
        let tmp = TempDir::new().unwrap();
        let input = format!("   {}  \r\n", tmp.path().display());

        let picked = PromptPicker::new(input.as_bytes(), Vec::new())
            .pick(&request())
            .unwrap();
        assert_eq!(picked, tmp.path());
    }

    #[test]
    fn prompt_empty_line_is_cancel() {
        let result = PromptPicker::new("\n".as_bytes(), Vec::new()).pick(&request());
        assert!(matches!(result, Err(PickError::Cancelled)));
    }

    #[test]
    fn prompt_end_of_input_is_cancel() {
        let result = PromptPicker::new("".as_bytes(), Vec::new()).pick(&request());
        assert!(matches!(result, Err(PickError::Cancelled)));
    }

    #[test]
    fn prompt_rejects_files() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.jpg");
        std::fs::write(&file, "fake image").unwrap();
        let input = format!("{}\n", file.display());

        let result = PromptPicker::new(input.as_bytes(), Vec::new()).pick(&request());
        assert!(matches!(result, Err(PickError::NotAFolder(p)) if p == file));
    }

    #[test]
    fn fixed_picker_ignores_request() {
        let mut picker = FixedPicker::new("/photos/holiday");
        assert_eq!(
            picker.pick(&request()).unwrap(),
            PathBuf::from("/photos/holiday")
        );
    }

    #[test]
    fn boxed_picker_delegates() {
        let mut picker: Box<dyn FolderPicker> = Box::new(FixedPicker::new("/a"));
        assert_eq!(picker.pick(&request()).unwrap(), PathBuf::from("/a"));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(PickError::Cancelled.code(), "CANCELLED");
        assert_eq!(PickError::NoSelection.code(), "NO_URL");
        assert_eq!(PickError::NotAFolder("/x".into()).code(), "NOT_A_FOLDER");
        assert_eq!(PickError::Io(io::Error::other("boom")).code(), "PICKER_FAILED");
    }

    #[test]
    fn request_from_config() {
        let config = crate::config::PickerConfig::default();
        let request = PickRequest::from(&config);
        assert_eq!(request.message, config.message);
        assert_eq!(request.prompt, "Open");
    }
}
