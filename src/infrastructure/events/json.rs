//! JSON Event Sink
//!
//! Outputs tree and link events as NDJSON for automation consumption.

use crate::domain::ports::{LinkEvent, LinkEventSink, TreeEvent, TreeEventSink};
use std::cell::RefCell;
use std::io::{self, Write};

/// Event sink that writes one JSON object per event
pub struct JsonEventSink {
    writer: RefCell<Box<dyn Write>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: RefCell::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            writer: RefCell::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        // A sink re-entered from its own write would find the writer busy;
        // drop that event rather than panic.
        if let Ok(mut writer) = self.writer.try_borrow_mut() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl TreeEventSink for JsonEventSink {
    fn on_tree_event(&self, event: &TreeEvent) {
        let json = match event {
            TreeEvent::StructureChanged { instance, path } => {
                serde_json::json!({
                    "event": "structure_changed",
                    "instance": instance,
                    "path": path.as_ref().map(|p| p.display().to_string()),
                })
            }

            TreeEvent::SelectionChanged { instance, path } => {
                serde_json::json!({
                    "event": "selection_changed",
                    "instance": instance,
                    "path": path,
                })
            }
        };

        self.write_event(json);
    }
}

impl LinkEventSink for JsonEventSink {
    fn on_link_event(&self, event: &LinkEvent) {
        let json = match event {
            LinkEvent::LinksChanged { groups } => {
                serde_json::json!({
                    "event": "links_changed",
                    "groups": groups,
                })
            }
        };

        self.write_event(json);
    }
}
