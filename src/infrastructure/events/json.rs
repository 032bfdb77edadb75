//! JSON Event Sink
//!
//! Outputs compile events as NDJSON for CI/automation consumption.

use crate::domain::ports::{CompileEvent, CompileEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl CompileEventSink for JsonEventSink {
    fn on_event(&self, event: CompileEvent) {
        let json = match event {
            CompileEvent::Started {
                index_path,
                entry_count,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "generate",
                    "index": index_path.display().to_string(),
                    "entry_count": entry_count,
                })
            }

            CompileEvent::HeaderWritten => {
                serde_json::json!({
                    "event": "header_written",
                    "command": "generate",
                })
            }

            CompileEvent::RulesWritten { count } => {
                serde_json::json!({
                    "event": "rules_written",
                    "command": "generate",
                    "count": count,
                })
            }

            CompileEvent::ToolEdgesWritten => {
                serde_json::json!({
                    "event": "tool_edges_written",
                    "command": "generate",
                })
            }

            CompileEvent::EntryCompiled {
                key,
                extraction,
                raw_output,
                final_output,
            } => {
                serde_json::json!({
                    "event": "item_compiled",
                    "command": "generate",
                    "key": key,
                    "extraction": extraction.as_str(),
                    "raw_output": raw_output,
                    "final_output": final_output,
                })
            }

            CompileEvent::EntrySkipped { key, reasons } => {
                let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                serde_json::json!({
                    "event": "item_skipped",
                    "command": "generate",
                    "key": key,
                    "reasons": reasons,
                })
            }

            CompileEvent::Completed { compiled, skipped } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "generate",
                    "status": "success",
                    "compiled": compiled,
                    "skipped": skipped,
                })
            }
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Ineligibility;
    use crate::domain::ports::ExtractionKind;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(CompileEvent::Started {
            index_path: PathBuf::from("data.idx"),
            entry_count: 5,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["entry_count"], 5);
        assert_eq!(events[0]["index"], "data.idx");
    }

    #[test]
    fn json_sink_outputs_entry_events() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(CompileEvent::EntryCompiled {
            key: "wall".to_string(),
            extraction: ExtractionKind::Root,
            raw_output: "$raw_output_root/wall.dds".to_string(),
            final_output: "$final_output_root/wall.png".to_string(),
        });
        sink.on_event(CompileEvent::EntrySkipped {
            key: "secret".to_string(),
            reasons: vec![Ineligibility::Encrypted, Ineligibility::Compressed],
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["extraction"], "root");
        assert_eq!(events[0]["final_output"], "$final_output_root/wall.png");
        assert_eq!(events[1]["event"], "item_skipped");
        assert_eq!(
            events[1]["reasons"],
            serde_json::json!(["encrypted", "compressed"])
        );
    }

    #[test]
    fn json_sink_outputs_complete_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(CompileEvent::Completed {
            compiled: 10,
            skipped: 5,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "complete");
        assert_eq!(events[0]["status"], "success");
        assert_eq!(events[0]["compiled"], 10);
        assert_eq!(events[0]["skipped"], 5);
    }
}
