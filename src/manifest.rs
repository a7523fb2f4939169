//! Slideshow manifest generation.
//!
//! Turns a folder of images into a `slideshow.json` file that lists every
//! image in the folder, sorted by filename:
//!
//! ```text
//! holiday/
//! ├── A.jpg
//! ├── a.png
//! ├── b.png
//! ├── notes.txt                    # not an image, skipped
//! ├── raw/                         # directories are skipped, no recursion
//! └── slideshow.json               # written by build_manifest
//! ```
//!
//! ```json
//! [
//!   {
//!     "image": "A.jpg"
//!   },
//!   {
//!     "image": "a.png"
//!   },
//!   {
//!     "image": "b.png"
//!   }
//! ]
//! ```
//!
//! ## Rules
//!
//! - Only the immediate entries of the folder are considered.
//! - An entry is an image when it is a file and its extension, lower-cased,
//!   is one of [`IMAGE_EXTENSIONS`]. Hidden files follow the same rule, so
//!   `.hidden.png` is listed while a bare `.jpg` (no extension) is not.
//! - Filenames keep their original casing and are sorted by byte order, so
//!   `A.jpg` sorts before `a.png`.
//! - An existing `slideshow.json` is never touched. [`build_manifest`]
//!   reports [`WriteOutcome::AlreadyExists`] and does nothing else.
//! - The write is all-or-nothing: the JSON goes to a temp file in the same
//!   folder which is then linked into place without clobbering.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Name of the manifest file written inside the scanned folder.
pub const MANIFEST_FILENAME: &str = "slideshow.json";

/// Lower-case extensions recognised as slideshow images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Cannot list folder {path}: {source}")]
    DirectoryUnavailable { path: PathBuf, source: io::Error },
    #[error("Cannot write manifest {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
    #[error("No manifest found at {0}")]
    Missing(PathBuf),
    #[error("Cannot read manifest {path}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("Malformed manifest {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One slideshow entry: a bare filename relative to the manifest's folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub image: String,
}

/// Ordered list of slides, serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub slides: Vec<Slide>,
}

impl Manifest {
    /// Build a manifest from filenames, sorting them first.
    pub fn from_filenames<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        Self {
            slides: names.into_iter().map(|image| Slide { image }).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Filenames in slideshow order.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|s| s.image.as_str())
    }

    /// Pretty-printed JSON, exactly as written to disk.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of a successful [`build_manifest`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new manifest was written with `count` entries (possibly zero).
    Created { path: PathBuf, count: usize },
    /// A manifest was already present; nothing was scanned or written.
    AlreadyExists { path: PathBuf },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Created { path, .. } | WriteOutcome::AlreadyExists { path } => path,
        }
    }
}

/// Path of the manifest for `folder`.
pub fn manifest_path(folder: &Path) -> PathBuf {
    folder.join(MANIFEST_FILENAME)
}

/// Return `true` if `path` has an allow-listed image extension (any case).
///
/// Only the name is inspected; callers check that the entry is a file.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Scan `folder` and write `slideshow.json` unless one already exists.
pub fn build_manifest(folder: &Path) -> Result<WriteOutcome, ManifestError> {
    let target = manifest_path(folder);

    if target.is_file() {
        info!(path = %target.display(), "manifest already exists, leaving it alone");
        return Ok(WriteOutcome::AlreadyExists { path: target });
    }

    let names = scan_images(folder)?;
    let manifest = Manifest::from_filenames(names);
    let count = manifest.len();

    match write_new(&target, &manifest) {
        Ok(()) => {
            info!(path = %target.display(), count, "created manifest");
            Ok(WriteOutcome::Created {
                path: target,
                count,
            })
        }
        // Another writer got there between the check and the persist.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && target.is_file() => {
            info!(path = %target.display(), "manifest appeared while scanning, leaving it alone");
            Ok(WriteOutcome::AlreadyExists { path: target })
        }
        Err(source) => Err(ManifestError::WriteFailed {
            path: target,
            source,
        }),
    }
}

/// List the image filenames directly inside `folder`, sorted.
///
/// This is the read-only half of [`build_manifest`].
pub fn scan_images(folder: &Path) -> Result<Vec<String>, ManifestError> {
    let unavailable = |source: io::Error| ManifestError::DirectoryUnavailable {
        path: folder.to_path_buf(),
        source,
    };

    let meta = fs::metadata(folder).map_err(unavailable)?;
    if !meta.is_dir() {
        return Err(unavailable(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| unavailable(e.into()))?;
        let path = entry.path();
        // Follows symlinks, unlike entry.file_type()
        if !path.is_file() || !is_image_file(path) {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => warn!(path = %path.display(), "skipping image with non UTF-8 filename"),
        }
    }

    names.sort();
    debug!(folder = %folder.display(), count = names.len(), "scanned images");
    Ok(names)
}

/// Read an existing `slideshow.json` from `folder`.
pub fn load_manifest(folder: &Path) -> Result<Manifest, ManifestError> {
    let path = manifest_path(folder);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ManifestError::Missing(path)),
        Err(source) => return Err(ManifestError::Unreadable { path, source }),
    };
    serde_json::from_str(&content).map_err(|source| ManifestError::Malformed { path, source })
}

/// Write `manifest` to `target` through a sibling temp file.
///
/// Fails with `ErrorKind::AlreadyExists` if anything occupies `target`. The
/// temp file is deleted on every error path when it is dropped.
fn write_new(target: &Path, manifest: &Manifest) -> io::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let json = manifest.to_json()?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(target).map_err(|e| e.error)?;
    Ok(())
}
