//! # Slideshow Bridge
//!
//! Host-side support for the slide show app. The user picks a folder of
//! images; the bridge answers with the folder path and writes a
//! `slideshow.json` next to the images listing them in filename order.
//!
//! ```text
//! FolderPicker ──path──→ build_manifest ──→ <folder>/slideshow.json
//!      ↑                       ↑
//!   Bridge (method calls, menu actions, events)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Scans a folder for images and writes `slideshow.json` |
//! | [`picker`] | The [`FolderPicker`](picker::FolderPicker) capability and its implementations |
//! | [`bridge`] | Method-call and menu-action dispatch around the picker and builder |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Manifest Is Written Once
//!
//! An existing `slideshow.json` is never read, merged or replaced. Users
//! edit it by hand to reorder or drop slides, and re-picking the folder must
//! not undo that. The caller still learns which case happened through
//! [`WriteOutcome`](manifest::WriteOutcome).
//!
//! ## The Builder Knows Nothing About Dialogs
//!
//! [`manifest::build_manifest`] takes a plain path. Whether it came from a
//! native dialog, a terminal prompt or a drag and drop is the picker's and
//! bridge's business.

pub mod bridge;
pub mod config;
pub mod manifest;
pub mod output;
pub mod picker;

#[cfg(test)]
pub(crate) mod test_helpers;
