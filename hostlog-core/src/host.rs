use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

use crate::{
    config::HOSTLOG_CONFIG,
    error::{LogError, Result},
};

/// Embedding applications with a script editor of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// Script editor with blocking confirm dialogs.
    Maya,
    /// Script editor with non-blocking message boxes.
    Nuke,
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostKind::Maya => f.write_str("Maya"),
            HostKind::Nuke => f.write_str("Nuke"),
        }
    }
}

/// A dialog shown to the user for high severity records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub buttons: Vec<String>,
    /// The emitting thread waits until the dialog is dismissed.
    pub blocking: bool,
}

impl Alert {
    /// Modal confirm dialog with a single `Dismiss` button.
    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec!["Dismiss".to_string()],
            blocking: true,
        }
    }

    /// Message box that does not hold up the caller.
    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: Vec::new(),
            blocking: false,
        }
    }
}

/// Console and dialog surfaces of an embedding host.
pub trait HostBridge: Send + Sync {
    /// Regular script editor output.
    fn print(&self, text: &str) -> Result<()>;
    /// Host warning line.
    fn warning(&self, text: &str) -> Result<()>;
    /// Host error line.
    fn error(&self, text: &str) -> Result<()>;
    /// The host runs without UI (batch render, terminal session).
    fn is_batch(&self) -> bool;
    /// Shows `alert`; returns once dismissed when `alert.blocking` is set.
    fn alert(&self, alert: Alert) -> Result<()>;
}

static MAYA_BRIDGE: OnceLock<Arc<dyn HostBridge>> = OnceLock::new();
static NUKE_BRIDGE: OnceLock<Arc<dyn HostBridge>> = OnceLock::new();

fn slot(kind: HostKind) -> &'static OnceLock<Arc<dyn HostBridge>> {
    match kind {
        HostKind::Maya => &MAYA_BRIDGE,
        HostKind::Nuke => &NUKE_BRIDGE,
    }
}

/// Registers the bridge of the host this process runs inside.
///
/// Called once by the embedding host at start-up. Loggers created afterwards
/// attach a host sink for `kind` unless told otherwise.
pub fn install_host(kind: HostKind, bridge: Arc<dyn HostBridge>) -> Result<()> {
    slot(kind)
        .set(bridge)
        .map_err(|_| LogError::HostAlreadyInstalled(kind))
}

/// Capability probe: whether a bridge for `kind` is installed. Never fails.
pub fn host_available(kind: HostKind) -> bool {
    installed_host(kind).is_some()
}

/// The installed bridge for `kind`, if any.
pub fn installed_host(kind: HostKind) -> Option<Arc<dyn HostBridge>> {
    if HOSTLOG_CONFIG.NO_HOSTS {
        return None;
    }
    slot(kind).get().cloned()
}

/// Event forwarded by a [`ChannelHost`].
#[derive(Debug)]
pub enum HostEvent {
    Print(String),
    Warning(String),
    Error(String),
    Alert {
        alert: Alert,
        /// Present for blocking alerts; the emitter waits until it is dismissed or dropped.
        pending: Option<PendingAlert>,
    },
}

/// Handle on a blocking alert waiting for the user.
#[derive(Debug)]
pub struct PendingAlert {
    ack: Sender<()>,
}

impl PendingAlert {
    pub fn dismiss(self) {
        let _ = self.ack.send(());
    }
}

/// Bridge forwarding every host call over a channel, for hosts whose UI lives
/// on another thread than the code doing the logging.
pub struct ChannelHost {
    sender: Sender<HostEvent>,
    batch: bool,
}

impl ChannelHost {
    pub fn new(batch: bool) -> (Self, Receiver<HostEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender, batch }, receiver)
    }

    fn send(&self, event: HostEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| LogError::HostDisconnected)
    }
}

impl HostBridge for ChannelHost {
    fn print(&self, text: &str) -> Result<()> {
        self.send(HostEvent::Print(text.to_string()))
    }

    fn warning(&self, text: &str) -> Result<()> {
        self.send(HostEvent::Warning(text.to_string()))
    }

    fn error(&self, text: &str) -> Result<()> {
        self.send(HostEvent::Error(text.to_string()))
    }

    fn is_batch(&self) -> bool {
        self.batch
    }

    fn alert(&self, alert: Alert) -> Result<()> {
        if !alert.blocking {
            return self.send(HostEvent::Alert {
                alert,
                pending: None,
            });
        }
        let (ack, dismissed) = bounded(1);
        self.send(HostEvent::Alert {
            alert,
            pending: Some(PendingAlert { ack }),
        })?;
        // Err means the UI side dropped the alert, which also ends the wait.
        let _ = dismissed.recv();
        Ok(())
    }
}
