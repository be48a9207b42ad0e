use std::sync::Arc;

use hostlog::{
    ChannelHost, HostEvent, HostKind, Level, SinkKind, get_logger, install_host, logger_config,
};

fn main() {
    // stand-in for the host UI thread
    let (host, events) = ChannelHost::new(false);
    install_host(HostKind::Maya, Arc::new(host)).unwrap();
    let ui = std::thread::spawn(move || {
        for event in events {
            match event {
                HostEvent::Print(text) => {
                    print!("[script editor] {text}");
                    if text.ends_with(" : done\n") {
                        break;
                    }
                }
                HostEvent::Warning(text) => println!("[script editor] // Warning: {}", text.trim()),
                HostEvent::Error(text) => println!("[script editor] // Error: {}", text.trim()),
                HostEvent::Alert { alert, pending } => {
                    println!("[dialog] {}: {} {:?}", alert.title, alert.message, alert.buttons);
                    if let Some(pending) = pending {
                        pending.dismiss();
                    }
                }
            }
        }
    });

    let log = logger_config()
        .with_level(Level::Debug)
        .with_log_file("/tmp/hostlog_dialogs.log")
        .get("shot_010");
    log.debug("opening scene").unwrap();
    log.info("scene opened").unwrap();
    log.warning("reference path is relative").unwrap();
    log.fatal("cache is out of date").unwrap();

    // same logger, no duplicate output
    get_logger("shot_010").info("done").unwrap();
    // the installed bridge never closes the channel; the UI thread stops on "done"
    if log.sinks().contains(&SinkKind::Maya) {
        ui.join().unwrap();
    }
}
