//! CLI output formatting.
//!
//! Every printed result has a `format_*` function returning `Vec<String>`
//! and a `print_*` wrapper that writes the lines to stdout. Format functions
//! are pure, so tests can check exact output without capturing stdout.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Created slideshow.json (3 images)
//!     Path: /photos/holiday/slideshow.json
//! ```
//!
//! ## Check / Show
//!
//! ```text
//! Images in /photos/holiday
//! 001 A.jpg
//! 002 a.png
//! 003 b.png
//! 3 images
//! ```
//!
//! ## Pick
//!
//! ```text
//! Selected /photos/holiday
//! slideshow.json already exists, left unchanged
//!     Path: /photos/holiday/slideshow.json
//! ```

use crate::bridge::{BridgeEvent, Reply};
use crate::manifest::{MANIFEST_FILENAME, WriteOutcome};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural_images(n: usize) -> String {
    match n {
        1 => "1 image".to_string(),
        n => format!("{n} images"),
    }
}

// ============================================================================
// Manifest builder
// ============================================================================

/// Format the result of a manifest build.
pub fn format_outcome(outcome: &WriteOutcome) -> Vec<String> {
    match outcome {
        WriteOutcome::Created { path, count } => vec![
            format!("Created {} ({})", MANIFEST_FILENAME, plural_images(*count)),
            format!("{}Path: {}", indent(1), path.display()),
        ],
        WriteOutcome::AlreadyExists { path } => vec![
            format!("{} already exists, left unchanged", MANIFEST_FILENAME),
            format!("{}Path: {}", indent(1), path.display()),
        ],
    }
}

pub fn print_outcome(outcome: &WriteOutcome) {
    for line in format_outcome(outcome) {
        println!("{}", line);
    }
}

/// Format an ordered image list under a folder heading.
///
/// Used for both dry-run scans and existing manifests.
pub fn format_image_list<'a>(
    folder: &Path,
    images: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut lines = vec![format!("Images in {}", folder.display())];
    let mut count = 0;
    for (i, name) in images.into_iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name));
        count += 1;
    }
    lines.push(plural_images(count));
    lines
}

pub fn print_image_list<'a>(folder: &Path, images: impl IntoIterator<Item = &'a str>) {
    for line in format_image_list(folder, images) {
        println!("{}", line);
    }
}

// ============================================================================
// Bridge
// ============================================================================

/// Format a bridge progress event as a single status line.
pub fn format_bridge_event(event: &BridgeEvent) -> Vec<String> {
    let line = match event {
        BridgeEvent::MenuTriggered(action) => format!("Menu: {:?}", action),
        BridgeEvent::FolderSelected(path) => format!("Selected {}", path.display()),
        BridgeEvent::PickFailed { code, message } => format!("Pick failed [{code}]: {message}"),
        BridgeEvent::ManifestCreated { count, .. } => {
            format!("Writing {} ({})", MANIFEST_FILENAME, plural_images(*count))
        }
        BridgeEvent::ManifestExists { .. } => {
            format!("Found existing {}", MANIFEST_FILENAME)
        }
        BridgeEvent::ManifestFailed { message } => format!("Manifest failed: {message}"),
    };
    vec![line]
}

/// Format the final reply of a bridge call.
pub fn format_reply(reply: &Reply) -> Vec<String> {
    match reply {
        Reply::Folder(picked) => {
            let mut lines = vec![format!("Selected {}", picked.path.display())];
            match &picked.manifest {
                Ok(outcome) => lines.extend(format_outcome(outcome)),
                Err(e) => lines.push(format!("{}Error: {}", indent(1), e)),
            }
            lines
        }
        Reply::Error { code, message } => vec![format!("Error [{code}]: {message}")],
        Reply::NotImplemented => vec!["Not implemented".to_string()],
    }
}

pub fn print_reply(reply: &Reply) {
    for line in format_reply(reply) {
        println!("{}", line);
    }
}
