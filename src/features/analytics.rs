//! Lightweight analytics events
//!
//! Events go to an optional [`AnalyticsSink`]. The [`Analytics`] wrapper
//! guarantees a missing or failing sink never affects the caller.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Small key/value payload attached to an event
pub type Payload = Map<String, Value>;

/// Destination for analytics events
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &str, payload: &Payload) -> Result<()>;
}

/// Fire-and-forget front for an optional sink
#[derive(Default)]
pub struct Analytics {
    sink: Option<Box<dyn AnalyticsSink>>,
}

impl Analytics {
    pub fn new(sink: impl AnalyticsSink + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    /// No sink; every event is dropped
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Send an event. Sink errors are logged and swallowed.
    pub fn track(&self, event: &str, payload: Payload) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(e) = sink.track(event, &payload) {
            tracing::warn!("Analytics tracking error for '{}': {:#}", event, e);
        }
    }
}

/// Build a payload from `(key, value)` pairs
pub fn payload<const N: usize>(pairs: [(&str, Value); N]) -> Payload {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Logs every event at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &str, payload: &Payload) -> Result<()> {
        let body = Value::Object(payload.clone());
        tracing::debug!(target: "analytics", "{} {}", event, body);
        Ok(())
    }
}

#[derive(Serialize)]
struct EventLine<'a> {
    timestamp: String,
    event: &'a str,
    payload: &'a Payload,
}

/// Appends one JSON object per event to a file
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalyticsSink for JsonLinesSink {
    fn track(&self, event: &str, payload: &Payload) -> Result<()> {
        let line = serde_json::to_string(&EventLine {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event,
            payload,
        })?;
        let mut file = self.file.lock();
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// Keeps every event in memory; clones share the same log
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: std::sync::Arc<Mutex<Vec<(String, Payload)>>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn events(&self) -> Vec<(String, Payload)> {
        self.events.lock().clone()
    }

    /// Payloads of every event named `event`
    pub fn named(&self, event: &str) -> Vec<Payload> {
        self.events()
            .into_iter()
            .filter(|(name, _)| name == event)
            .map(|(_, payload)| payload)
            .collect()
    }
}

#[cfg(test)]
impl AnalyticsSink for RecordingSink {
    fn track(&self, event: &str, payload: &Payload) -> Result<()> {
        self.events.lock().push((event.to_string(), payload.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSink(Arc<AtomicUsize>);

    impl AnalyticsSink for FailingSink {
        fn track(&self, _event: &str, _payload: &Payload) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("sink offline")
        }
    }

    #[test]
    fn failing_sink_is_swallowed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analytics = Analytics::new(FailingSink(calls.clone()));
        analytics.track("page_view", payload([("page", json!("/"))]));
        analytics.track("page_view", Payload::new());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn disabled_analytics_drops_events() {
        let analytics = Analytics::disabled();
        assert!(!analytics.is_enabled());
        analytics.track("quote_selected", payload([("index", json!(2))]));
    }

    #[test]
    fn tracing_sink_accepts_events() {
        let analytics = Analytics::new(TracingSink);
        analytics.track("page_view", payload([("page", json!("quotes"))]));
        assert!(
            TracingSink
                .track("time_on_page", &payload([("seconds", json!(3))]))
                .is_ok()
        );
    }

    #[test]
    fn recording_sink_keeps_events_in_order() {
        let sink = RecordingSink::default();
        let analytics = Analytics::new(sink.clone());
        analytics.track("page_view", Payload::new());
        analytics.track("quote_selected", payload([("index", json!(1))]));

        let names: Vec<String> = sink.events().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["page_view", "quote_selected"]);
        assert_eq!(sink.named("quote_selected")[0]["index"], 1);
    }

    #[test]
    fn payload_keeps_pairs() {
        let p = payload([("index", json!(3)), ("source", json!("keyboard"))]);
        assert_eq!(p.get("index"), Some(&json!(3)));
        assert_eq!(p.get("source"), Some(&json!("keyboard")));
    }

    #[test]
    fn json_lines_sink_appends_events() {
        let path = std::env::temp_dir().join(format!(
            "quoteloop-analytics-{}-{}.jsonl",
            std::process::id(),
            rand::random::<u32>()
        ));
        let sink = JsonLinesSink::open(&path).expect("open sink");
        sink.track("page_view", &payload([("page", json!("/"))]))
            .expect("first event");
        sink.track("time_on_page", &payload([("seconds", json!(42))]))
            .expect("second event");

        let content = std::fs::read_to_string(sink.path()).expect("read log");
        let lines: Vec<Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "page_view");
        assert_eq!(lines[1]["payload"]["seconds"], 42);
        assert!(lines[0]["timestamp"].is_string());

        let _ = std::fs::remove_file(&path);
    }
}
