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

//! # Jumhur Structured Logging
//!
//! Structured, JSON-first logging backend: leveled records with an event
//! name and arbitrary key/value fields, console and rotating-file handlers,
//! and optional asynchronous emission. Initializing the backend also
//! installs it behind the `log` facade, so `log::info!`-style call sites
//! throughout the crate end up in the same handlers.

pub mod config;
pub mod context;
pub mod core;
pub mod formatters;
pub mod handlers;

pub use self::config::JmLogConfig;
pub use self::context::JmLogContext;
pub use self::core::{JmLogLevel, JmLogRecord, JmLogger};
