use std::sync::Arc;

use crate::{
    config::HOSTLOG_CONFIG,
    error::Result,
    format::format_record,
    host::{Alert, HostBridge},
    record::{Method, Record},
    sink::{Sink, SinkKind},
};

fn batch_mode(bridge: &dyn HostBridge) -> bool {
    HOSTLOG_CONFIG.BATCH || bridge.is_batch()
}

fn alert_title(method: Method) -> String {
    format!("A {method} has occurred")
}

/// Maya script editor sink.
///
/// `warning` records become host warnings, `critical`/`fatal` records are
/// printed and then raised in a blocking confirm dialog unless Maya runs in
/// batch mode.
pub struct MayaSink {
    bridge: Arc<dyn HostBridge>,
}

impl MayaSink {
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        Self { bridge }
    }
}

impl Sink for MayaSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Maya
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let line = format_record(record);
        match record.method() {
            // Leading newline keeps the line apart from the editor's prefix.
            Method::Warning => self.bridge.warning(&format!("\n{line}")),
            method if method.is_escalating() => {
                self.bridge.print(&format!("\n{line}\n"))?;
                if batch_mode(self.bridge.as_ref()) {
                    return Ok(());
                }
                self.bridge
                    .alert(Alert::confirm(alert_title(method), record.message()))
            }
            _ => self.bridge.print(&format!("{line}\n")),
        }
    }
}

/// Nuke script editor sink.
///
/// `critical`/`fatal` records always reach the error console before the
/// message box is requested, so they stay visible whatever the dialog does.
pub struct NukeSink {
    bridge: Arc<dyn HostBridge>,
}

impl NukeSink {
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        Self { bridge }
    }
}

impl Sink for NukeSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Nuke
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let line = format_record(record);
        match record.method() {
            Method::Warning => self.bridge.warning(&line),
            method if method.is_escalating() => {
                self.bridge.error(&line)?;
                if batch_mode(self.bridge.as_ref()) {
                    return Ok(());
                }
                self.bridge
                    .alert(Alert::message(alert_title(method), record.message()))
            }
            _ => self.bridge.print(&format!("{line}\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crossbeam_channel::Receiver;

    use super::*;
    use crate::{
        host::{ChannelHost, HostEvent},
        record::Level,
    };

    fn maya(batch: bool) -> (MayaSink, Receiver<HostEvent>) {
        let (host, events) = ChannelHost::new(batch);
        (MayaSink::new(Arc::new(host)), events)
    }

    fn nuke(batch: bool) -> (NukeSink, Receiver<HostEvent>) {
        let (host, events) = ChannelHost::new(batch);
        (NukeSink::new(Arc::new(host)), events)
    }

    #[test]
    fn test_maya_regular_and_warning() {
        let (sink, events) = maya(true);
        sink.emit(&Record::new("rig", Level::Info, Method::Info, "loaded"))
            .unwrap();
        sink.emit(&Record::new("rig", Level::Warning, Method::Warning, "slow"))
            .unwrap();
        let events: Vec<_> = events.try_iter().collect();
        assert!(matches!(&events[0], HostEvent::Print(text) if text.ends_with("rig INFO : loaded\n")));
        assert!(matches!(&events[1], HostEvent::Warning(text) if text.starts_with('\n') && text.ends_with("rig WARNING : slow")));
    }

    #[test]
    fn test_maya_critical_in_batch_mode_prints_only() {
        let (sink, events) = maya(true);
        sink.emit(&Record::new("rig", Level::Critical, Method::Critical, "no license"))
            .unwrap();
        let events: Vec<_> = events.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], HostEvent::Print(text) if text.ends_with("rig CRITICAL : no license\n")));
    }

    #[test]
    fn test_maya_fatal_opens_blocking_dialog() {
        let (sink, events) = maya(false);
        let ui = thread::spawn(move || {
            let mut seen = Vec::new();
            for event in events.iter() {
                if let HostEvent::Alert { alert, pending } = event {
                    pending.expect("maya dialogs block").dismiss();
                    seen.push(alert);
                    break;
                }
            }
            seen
        });
        sink.emit(&Record::new("rig", Level::FATAL, Method::Fatal, "scene: corrupt"))
            .unwrap();
        let alerts = ui.join().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "A fatal has occurred");
        assert_eq!(alerts[0].message, "scene: corrupt");
    }

    #[test]
    fn test_escalation_keyed_on_method() {
        let (sink, events) = maya(false);
        sink.emit(&Record::new("rig", Level::Critical, Method::Log, "custom path"))
            .unwrap();
        let events: Vec<_> = events.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], HostEvent::Print(_)));
    }

    #[test]
    fn test_nuke_critical_reports_error_then_message() {
        let (sink, events) = nuke(false);
        sink.emit(&Record::new("comp", Level::Critical, Method::Critical, "missing plate"))
            .unwrap();
        let events: Vec<_> = events.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], HostEvent::Error(text) if text.ends_with("comp CRITICAL : missing plate")));
        assert!(matches!(
            &events[1],
            HostEvent::Alert { alert, pending: None } if alert.message == "missing plate"
        ));
    }

    #[test]
    fn test_nuke_batch_and_regular() {
        let (sink, events) = nuke(true);
        sink.emit(&Record::new("comp", Level::FATAL, Method::Fatal, "gone"))
            .unwrap();
        sink.emit(&Record::new("comp", Level::Debug, Method::Debug, "frame 12"))
            .unwrap();
        sink.emit(&Record::new("comp", Level::Warning, Method::Warning, "proxy"))
            .unwrap();
        let events: Vec<_> = events.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], HostEvent::Error(_)));
        assert!(matches!(&events[1], HostEvent::Print(text) if text.ends_with("comp DEBUG : frame 12\n")));
        assert!(matches!(&events[2], HostEvent::Warning(text) if text.ends_with("comp WARNING : proxy")));
    }
}
