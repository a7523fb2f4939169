//! Shared test utilities for the slideshow-bridge test suite.
//!
//! Provides folder fixtures, manifest readers, and a scripted
//! [`FolderPicker`] that records every request it receives.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = folder_with(&["b.png", "a.jpg", "notes.txt"]);
//! build_manifest(tmp.path()).unwrap();
//!
//! assert_eq!(manifest_images(tmp.path()), vec!["a.jpg", "b.png"]);
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::manifest::MANIFEST_FILENAME;
use crate::picker::{FolderPicker, PickError, PickRequest};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp folder containing empty-ish files with the given names.
///
/// Scanning only looks at names, so file contents are placeholders.
pub fn folder_with(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        std::fs::write(tmp.path().join(name), "fake image").unwrap();
    }
    tmp
}

/// Sorted names of everything directly inside `dir`.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Manifest readers: panic with a clear message on failure
// =========================================================================

/// Image names from the `slideshow.json` in `dir`, in file order.
pub fn manifest_images(dir: &Path) -> Vec<String> {
    let path = dir.join(MANIFEST_FILENAME);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    let value: serde_json::Value = serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("invalid JSON in {}: {e}", path.display()));
    value
        .as_array()
        .unwrap_or_else(|| panic!("manifest is not an array: {content}"))
        .iter()
        .map(|record| {
            let obj = record
                .as_object()
                .unwrap_or_else(|| panic!("record is not an object: {record}"));
            assert_eq!(obj.len(), 1, "record has extra keys: {record}");
            obj["image"].as_str().unwrap().to_string()
        })
        .collect()
}

// =========================================================================
// Scripted picker
// =========================================================================

/// Picker that replays canned answers and records each request.
///
/// Runs out of answers by cancelling.
#[derive(Default)]
pub struct ScriptedPicker {
    pub answers: VecDeque<Result<PathBuf, PickError>>,
    pub requests: Vec<PickRequest>,
}

impl ScriptedPicker {
    pub fn new(answers: Vec<Result<PathBuf, PickError>>) -> Self {
        Self {
            answers: answers.into(),
            requests: Vec::new(),
        }
    }

    pub fn choosing(path: &Path) -> Self {
        Self::new(vec![Ok(path.to_path_buf())])
    }

    pub fn cancelling() -> Self {
        Self::new(vec![Err(PickError::Cancelled)])
    }

    pub fn get_requests(&self) -> Vec<PickRequest> {
        self.requests.clone()
    }
}

impl FolderPicker for ScriptedPicker {
    fn pick(&mut self, request: &PickRequest) -> Result<PathBuf, PickError> {
        self.requests.push(request.clone());
        self.answers
            .pop_front()
            .unwrap_or(Err(PickError::Cancelled))
    }
}
