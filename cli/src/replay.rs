//! Recorded host event replay
//!
//! A recording is a JSON-lines file with one host event per line, tagged by
//! `kind`:
//!
//! ```text
//! {"kind":"signal","signal":{"type":"npc_spawned","npc":{"index":1,"id":11730,"name":"Zebak"}}}
//! {"kind":"tick","region":15700,"status_widget_visible":true}
//! {"kind":"config","key":"zebak_prayer_indicator","config":{"zebak_prayer_indicator":false}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fmt;
use std::path::{Path, PathBuf};

use amascut_core::prediction::PrayerAdvice;
use amascut_core::{GameSignal, PluginRuntime, SessionState, TickInput};
use amascut_types::PluginConfig;
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read recording {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid event on line {line}: {source}")]
    ParseLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded host event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    Tick(TickInput),
    Signal { signal: GameSignal },
    Config {
        key: String,
        #[serde(default)]
        config: PluginConfig,
    },
}

/// Runtime state observed after a tick settled
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Host wall clock, when the recording carries one
    pub timestamp: Option<NaiveDateTime>,
    pub state: SessionState,
    pub transitioned: bool,
    pub active: Vec<&'static str>,
    pub advice: Option<PrayerAdvice>,
    /// Advice is highlighted in the prayer book
    pub widget: bool,
    /// Advice is shown in the info box
    pub info_box: bool,
    pub health: Option<i32>,
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let room = self.state.encounter.map_or("-", |e| e.name());
        let marker = if self.transitioned { "*" } else { " " };
        write!(f, "[{:>5}]", self.tick)?;
        if let Some(timestamp) = self.timestamp {
            write!(f, " {}", timestamp.format("%H:%M:%S%.3f"))?;
        }
        write!(f, "{marker} {room:<18}")?;
        if self.state.in_lobby {
            write!(f, " lobby")?;
        }
        if self.state.in_session {
            write!(f, " session")?;
        }
        if !self.active.is_empty() {
            write!(f, " active={}", self.active.join(","))?;
        }
        if let Some(advice) = &self.advice {
            write!(f, " pray={}", advice.prayer.name())?;
            if let Some(ticks) = advice.ticks {
                write!(f, " in {ticks}t")?;
            }
            write!(f, " ({})", advice.source)?;
            match (self.widget, self.info_box) {
                (true, true) => write!(f, " [widget,info_box]")?,
                (true, false) => write!(f, " [widget]")?,
                (false, true) => write!(f, " [info_box]")?,
                (false, false) => {}
            }
        }
        if let Some(hp) = self.health {
            write!(f, " hp_to_phase={hp}")?;
        }
        Ok(())
    }
}

pub fn parse_events(contents: &str) -> Result<Vec<HostEvent>, ReplayError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::ParseLine {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

pub async fn load_events(path: &Path) -> Result<Vec<HostEvent>, ReplayError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReplayError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    parse_events(&contents)
}

/// Feed events through the runtime, reporting once per tick.
pub fn run(runtime: &mut PluginRuntime, events: &[HostEvent]) -> Vec<TickReport> {
    let mut reports = Vec::new();

    for event in events {
        match event {
            HostEvent::Signal { signal } => runtime.handle_signal(signal),
            HostEvent::Config { key, config } => runtime.update_config(key, config.clone()),
            HostEvent::Tick(input) => {
                let transitioned = runtime.on_tick(input).is_some();
                reports.push(TickReport {
                    tick: runtime.tick(),
                    timestamp: runtime.timestamp(),
                    state: *runtime.session_state(),
                    transitioned,
                    active: runtime.active_components(),
                    advice: runtime.prayer_advice(),
                    widget: runtime.widget_advice().is_some(),
                    info_box: runtime.info_box_advice().is_some(),
                    health: runtime.health_counter(),
                });
            }
        }
    }

    tracing::debug!(events = events.len(), ticks = reports.len(), "Replay finished");
    reports
}
