//! In-process bridge between the slide show UI and the host.
//!
//! The UI talks to the host through named method calls and menu actions.
//! Both end up in the same flow: ask a [`FolderPicker`] for a folder, answer
//! the UI with the chosen path, then build the folder's `slideshow.json`.
//!
//! ```text
//! "pickFolder" ─┐
//!               ├─→ picker.pick() ─→ build_manifest(path) ─→ Reply::Folder
//! OpenFolder  ──┘         │
//!                         └─ cancelled / failed ─────────→ Reply::Error
//! ```
//!
//! Unlike a fire-and-forget side effect, the manifest result travels back
//! in the reply, so the UI can tell a fresh manifest from an existing one.
//!
//! Progress is reported as [`BridgeEvent`]s on an optional channel, and
//! [`spawn_pick_folder`] runs the whole flow on its own thread for callers
//! that must not block.

use crate::config::BridgeConfig;
use crate::manifest::{self, ManifestError, WriteOutcome};
use crate::picker::{FolderPicker, PickRequest};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Methods the UI can call by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    PickFolder,
    FolderDropped,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::PickFolder => "pickFolder",
            Method::FolderDropped => "folderDropped",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickFolder" => Ok(Method::PickFolder),
            "folderDropped" => Ok(Method::FolderDropped),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

/// Host menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    OpenFolder,
    StartSlideshow,
}

/// A folder the user chose, plus what happened to its manifest.
#[derive(Debug)]
pub struct PickedFolder {
    pub path: PathBuf,
    pub manifest: Result<WriteOutcome, ManifestError>,
}

/// Answer to a method call.
#[derive(Debug)]
pub enum Reply {
    Folder(PickedFolder),
    Error { code: &'static str, message: String },
    NotImplemented,
}

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    MenuTriggered(MenuAction),
    FolderSelected(PathBuf),
    PickFailed { code: &'static str, message: String },
    ManifestCreated { path: PathBuf, count: usize },
    ManifestExists { path: PathBuf },
    ManifestFailed { message: String },
}

type MenuHandler = Box<dyn FnMut(MenuAction) + Send>;

pub struct Bridge<P> {
    picker: P,
    request: PickRequest,
    events: Option<Sender<BridgeEvent>>,
    handlers: HashMap<MenuAction, Vec<MenuHandler>>,
}

impl<P: FolderPicker> Bridge<P> {
    pub fn new(picker: P, config: &BridgeConfig) -> Self {
        Self {
            picker,
            request: PickRequest::from(&config.picker),
            events: None,
            handlers: HashMap::new(),
        }
    }

    /// Send progress events to `tx`. A closed receiver is ignored.
    pub fn with_events(mut self, tx: Sender<BridgeEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    /// Dispatch a method call by name.
    ///
    /// `folderDropped` is accepted but not served here: drops arrive through
    /// [`Bridge::folder_dropped`] instead.
    pub fn handle(&mut self, method: &str) -> Reply {
        debug!(method, "method call");
        match method.parse::<Method>() {
            Ok(Method::PickFolder) => self.pick_folder(),
            Ok(Method::FolderDropped) => Reply::NotImplemented,
            Err(e) => {
                warn!("{e}");
                Reply::NotImplemented
            }
        }
    }

    /// Ask the picker for a folder and build its manifest.
    pub fn pick_folder(&mut self) -> Reply {
        match self.picker.pick(&self.request) {
            Ok(path) => {
                info!(path = %path.display(), "folder selected");
                Reply::Folder(self.process_folder(path))
            }
            Err(e) => {
                info!(code = e.code(), "folder selection failed: {e}");
                let code = e.code();
                let message = e.to_string();
                self.emit(BridgeEvent::PickFailed {
                    code,
                    message: message.clone(),
                });
                Reply::Error { code, message }
            }
        }
    }

    /// Build the manifest for a folder dropped onto the window.
    pub fn folder_dropped(&mut self, path: impl Into<PathBuf>) -> Reply {
        let path = path.into();
        info!(path = %path.display(), "folder dropped");
        Reply::Folder(self.process_folder(path))
    }

    /// Register a handler that runs whenever `action` is triggered.
    pub fn on_menu(&mut self, action: MenuAction, handler: impl FnMut(MenuAction) + Send + 'static) {
        self.handlers
            .entry(action)
            .or_default()
            .push(Box::new(handler));
    }

    /// Run a menu action.
    ///
    /// `OpenFolder` runs the pick flow and returns its reply; `StartSlideshow`
    /// belongs to the UI and only notifies registered handlers.
    pub fn trigger(&mut self, action: MenuAction) -> Option<Reply> {
        debug!(?action, "menu action");
        self.emit(BridgeEvent::MenuTriggered(action));
        let reply = match action {
            MenuAction::OpenFolder => Some(self.pick_folder()),
            MenuAction::StartSlideshow => None,
        };
        if let Some(handlers) = self.handlers.get_mut(&action) {
            for handler in handlers.iter_mut() {
                handler(action);
            }
        }
        reply
    }

    fn process_folder(&self, path: PathBuf) -> PickedFolder {
        self.emit(BridgeEvent::FolderSelected(path.clone()));
        let result = manifest::build_manifest(&path);
        match &result {
            Ok(WriteOutcome::Created { path, count }) => self.emit(BridgeEvent::ManifestCreated {
                path: path.clone(),
                count: *count,
            }),
            Ok(WriteOutcome::AlreadyExists { path }) => {
                self.emit(BridgeEvent::ManifestExists { path: path.clone() })
            }
            Err(e) => {
                warn!("{e}");
                self.emit(BridgeEvent::ManifestFailed {
                    message: e.to_string(),
                })
            }
        }
        PickedFolder {
            path,
            manifest: result,
        }
    }

    fn emit(&self, event: BridgeEvent) {
        if let Some(tx) = &self.events {
            tx.send(event).ok();
        }
    }
}

/// Run [`Bridge::pick_folder`] on a new thread.
///
/// The bridge comes back with the reply so it can be reused.
pub fn spawn_pick_folder<P>(mut bridge: Bridge<P>) -> JoinHandle<(Bridge<P>, Reply)>
where
    P: FolderPicker + Send + 'static,
{
    std::thread::spawn(move || {
        let reply = bridge.pick_folder();
        (bridge, reply)
    })
}
