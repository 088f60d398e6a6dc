use std::{
    cmp::Ordering,
    sync::atomic::{AtomicU8, Ordering as AtomicOrdering},
};

static MIN_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info.rank());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl LogLevel {
    const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
        }
    }

    fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Debug,
            1 => Self::Info,
            _ => Self::Warn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            _ => None,
        }
    }
}

pub fn set_min_level(level: LogLevel) {
    MIN_LOG_LEVEL.store(level.rank(), AtomicOrdering::Relaxed);
}

pub fn min_level() -> LogLevel {
    LogLevel::from_rank(MIN_LOG_LEVEL.load(AtomicOrdering::Relaxed))
}

pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < min_level() {
        return;
    }

    let payload = event_payload(now_unix_millis(), level, event, fields);
    emit(&payload.to_string());
}

fn event_payload(
    ts: u64,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_debug_info_warn() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert_eq!(LogLevel::from_rank(LogLevel::Warn.rank()), LogLevel::Warn);
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }

    #[test]
    fn payload_merges_event_fields() {
        let payload = event_payload(
            1_700_000_000_000,
            LogLevel::Info,
            "bug_retreat_started",
            serde_json::json!({ "x": 12.5, "mode": "retreating" }),
        );

        assert_eq!(payload["ts"], 1_700_000_000_000u64);
        assert_eq!(payload["level"], "info");
        assert_eq!(payload["event"], "bug_retreat_started");
        assert_eq!(payload["x"], 12.5);
        assert_eq!(payload["mode"], "retreating");
    }

    #[test]
    fn non_object_fields_are_dropped() {
        let payload = event_payload(1, LogLevel::Warn, "content_parse_failed", serde_json::json!("oops"));
        let object = payload.as_object().expect("payload is an object");

        assert_eq!(object.len(), 3);
    }
}
