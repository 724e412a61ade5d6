//! Copyright © 2025 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jumhur.
//! The Jumhur project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use std::sync::{mpsc, Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};

use super::config::JmLogConfig;
use super::context::JmLogContext;
use super::handlers::{JmFileHandler, JmLogHandler, JmStdoutHandler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JmLogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Success,
}

impl JmLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            JmLogLevel::Debug => "DEBUG",
            JmLogLevel::Info => "INFO",
            JmLogLevel::Warning => "WARNING",
            JmLogLevel::Error => "ERROR",
            JmLogLevel::Success => "SUCCESS",
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            JmLogLevel::Debug => 10,
            JmLogLevel::Info => 20,
            JmLogLevel::Success => 25,
            JmLogLevel::Warning => 30,
            JmLogLevel::Error => 40,
        }
    }
}

impl From<log::Level> for JmLogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => JmLogLevel::Error,
            log::Level::Warn => JmLogLevel::Warning,
            log::Level::Info => JmLogLevel::Info,
            log::Level::Debug | log::Level::Trace => JmLogLevel::Debug,
        }
    }
}

#[derive(Clone, Debug)]
pub struct JmLogRecord {
    pub level: JmLogLevel,
    pub event: String,
    pub message: String,
    pub fields: Map<String, Value>,
    pub context: Map<String, Value>,
    pub timestamp: SystemTime,
}

impl JmLogRecord {
    pub fn to_json(&self) -> Value {
        let ts = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let mut data = Map::new();
        data.insert("level".into(), json!(self.level.as_str()));
        data.insert("event".into(), json!(self.event));
        data.insert("message".into(), json!(self.message));
        data.insert("timestamp_ms".into(), json!(ts));

        let mut merged = self.context.clone();
        for (k, v) in &self.fields {
            merged.insert(k.clone(), v.clone());
        }
        data.insert("fields".into(), Value::Object(merged));

        Value::Object(data)
    }
}

struct JmLoggerInner {
    config: JmLogConfig,
    handlers: Vec<Box<dyn JmLogHandler + Send + Sync>>,
}

impl JmLoggerInner {
    fn emit(&self, record: JmLogRecord) {
        if !self.config.should_log(&record) {
            return;
        }
        for handler in &self.handlers {
            handler.handle(&record);
        }
    }
}

static ASYNC_TX: OnceLock<Mutex<mpsc::Sender<JmLogRecord>>> = OnceLock::new();
static LOGGER: OnceLock<JmLoggerInner> = OnceLock::new();
static FACADE: JmLogFacade = JmLogFacade;

#[derive(Debug, Default)]
pub struct JmLogger;

impl JmLogger {
    /// Initialize the global logger with a configuration. Safe to call
    /// multiple times; the first call wins. Also installs the structured
    /// backend behind the `log` facade so macro call sites share handlers.
    pub fn init(config: JmLogConfig) {
        let _ = LOGGER.get_or_init(|| {
            let mut handlers: Vec<Box<dyn JmLogHandler + Send + Sync>> = Vec::new();
            if config.console_enabled {
                handlers.push(Box::new(JmStdoutHandler::new(config.json_format_console)));
            }
            if config.file_enabled {
                if let Some(path) = &config.file_path {
                    handlers.push(Box::new(JmFileHandler::new(
                        path.clone(),
                        config.json_format_console,
                        config.rotate_when.clone(),
                        config.max_bytes,
                        config.backup_count,
                    )));
                }
            }

            let max_level = match config.parse_level(&config.default_level) {
                JmLogLevel::Debug => log::LevelFilter::Debug,
                JmLogLevel::Warning => log::LevelFilter::Warn,
                JmLogLevel::Error => log::LevelFilter::Error,
                _ => log::LevelFilter::Info,
            };
            if log::set_logger(&FACADE).is_ok() {
                log::set_max_level(max_level);
            }

            let inner = JmLoggerInner {
                config: config.clone(),
                handlers,
            };

            if inner.config.async_logging {
                let (tx, rx) = mpsc::channel::<JmLogRecord>();
                let _ = ASYNC_TX.set(Mutex::new(tx));

                std::thread::spawn(move || {
                    while let Ok(record) = rx.recv() {
                        if let Some(inner_ref) = LOGGER.get() {
                            inner_ref.emit(record);
                        }
                    }
                });
            }

            inner
        });
    }

    /// Emit a structured log event.
    pub fn event<L, S>(level: JmLogLevel, event: S, message: S, fields: L)
    where
        L: IntoIterator<Item = (String, Value)>,
        S: Into<String>,
    {
        if let Some(inner) = LOGGER.get() {
            let mut field_map = Map::new();
            for (k, v) in fields {
                field_map.insert(k, v);
            }
            let mut context = Map::new();
            for (k, v) in JmLogContext::get() {
                context.insert(k, v);
            }

            let record = JmLogRecord {
                level,
                event: event.into(),
                message: message.into(),
                fields: field_map,
                context,
                timestamp: SystemTime::now(),
            };
            // With async logging enabled, hand the record to the channel;
            // otherwise emit synchronously.
            if let Some(tx_mutex) = ASYNC_TX.get() {
                if let Ok(tx) = tx_mutex.lock() {
                    let _ = tx.send(record);
                    return;
                }
            }
            inner.emit(record);
        }
    }
}

/// Bridge from the `log` facade into the structured backend.
struct JmLogFacade;

impl log::Log for JmLogFacade {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        LOGGER.get().is_some()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        JmLogger::event(
            JmLogLevel::from(record.level()),
            record.target().to_string(),
            record.args().to_string(),
            Vec::<(String, Value)>::new(),
        );
    }

    fn flush(&self) {}
}
