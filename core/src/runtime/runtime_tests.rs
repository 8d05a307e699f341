//! Tests for PluginRuntime wiring
//!
//! Drives the real encounter modules through region changes, config changes
//! and per-tick signal ordering.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use amascut_types::{AttackCounterMode, CONFIG_GROUP, PluginConfig, PrayerMode};
use chrono::NaiveDate;

use super::PluginRuntime;
use crate::encounters::{Akkha, AkkhaMemoryBlast, AttackStyle, Kephri, Zebak};
use crate::game_data::{EncounterId, item_id, npc_id, projectile_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::points::PointsTracker;
use crate::prediction::PrayerKind;
use crate::raid_state::SessionState;
use crate::signal_processor::{
    GameSignal, NpcRef, SignalContext, SignalHandler, TickInput, WorldPoint,
};

const ZEBAK_REGION: u32 = 15700;
const AKKHA_REGION: u32 = 14676;
const KEPHRI_REGION: u32 = 14164;

fn in_region(region: u32) -> TickInput {
    TickInput {
        region: Some(region),
        status_widget_visible: true,
        player_location: Some(WorldPoint::new(3500, 5400, 0)),
        timestamp: None,
    }
}

/// Records the config keys it is notified of
struct ConfigListener {
    keys: Rc<RefCell<Vec<String>>>,
}

impl SignalHandler for ConfigListener {
    fn handle_signal(&mut self, signal: &GameSignal, _ctx: &SignalContext<'_>) {
        if let GameSignal::ConfigChanged { key, .. } = signal {
            self.keys.borrow_mut().push(key.clone());
        }
    }
}

impl LifecycleComponent for ConfigListener {
    fn name(&self) -> &'static str {
        "config_listener"
    }

    fn is_enabled(&self, _config: &PluginConfig, _state: &SessionState) -> bool {
        true
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn started_runtime(config: PluginConfig) -> PluginRuntime {
    let mut runtime = PluginRuntime::with_default_components(config);
    runtime.start();
    runtime
}

fn rock(remaining_cycles: i32, start_cycle: i32) -> GameSignal {
    GameSignal::ProjectileMoved {
        projectile_id: projectile_id::ZEBAK_MAGIC_ROCK,
        remaining_cycles,
        start_cycle,
        origin: WorldPoint::default(),
        targets_other_player: false,
    }
}

fn akkha_npc() -> NpcRef {
    NpcRef {
        index: 12,
        id: npc_id::AKKHA_MELEE,
        name: "Akkha".to_string(),
    }
}

#[test]
fn entering_room_starts_its_component() {
    let mut runtime = started_runtime(PluginConfig::default());
    assert!(runtime.active_components().is_empty());

    let (_, new) = runtime.on_tick(&in_region(ZEBAK_REGION)).unwrap();
    assert_eq!(new.encounter, Some(EncounterId::Zebak));
    assert_eq!(runtime.active_components(), vec!["zebak", "points_tracker"]);
    assert!(runtime.component::<Zebak>().is_some());
    assert!(runtime.component::<Akkha>().is_none());

    runtime.on_tick(&in_region(AKKHA_REGION));
    assert_eq!(
        runtime.active_components(),
        vec!["akkha", "akkha_final_stand", "akkha_memory_blast", "points_tracker"]
    );
    assert!(runtime.component::<Zebak>().is_none());
    assert!(runtime.component::<AkkhaMemoryBlast>().is_some());
}

#[test]
fn signals_apply_before_tick_decay() {
    let mut runtime = started_runtime(PluginConfig::default());
    runtime.on_tick(&in_region(ZEBAK_REGION));

    // 60 / 30 + 1 + 3 = 6 ticks when queued
    runtime.handle_signal(&rock(60, 100));
    runtime.on_tick(&in_region(ZEBAK_REGION));

    let advice = runtime.prayer_advice().unwrap();
    assert_eq!(advice.prayer, PrayerKind::Magic);
    assert_eq!(advice.ticks, Some(5));
    assert_eq!(advice.source, "zebak");
}

#[test]
fn started_component_sees_npcs_already_spawned() {
    let mut runtime = started_runtime(PluginConfig::default());
    runtime.handle_signal(&GameSignal::NpcSpawned { npc: akkha_npc() });

    runtime.on_tick(&in_region(AKKHA_REGION));

    let advice = runtime.prayer_advice().unwrap();
    assert_eq!(advice.prayer, PrayerKind::Melee);

    runtime.handle_signal(&GameSignal::NpcChanged {
        npc: NpcRef {
            id: npc_id::AKKHA_RANGE,
            ..akkha_npc()
        },
        old_id: npc_id::AKKHA_MELEE,
    });
    let akkha = runtime.component::<Akkha>().unwrap();
    assert_eq!(akkha.attack_style(), AttackStyle::Range);
}

#[test]
fn config_change_revalidates() {
    let mut runtime = started_runtime(PluginConfig::default());
    runtime.on_tick(&in_region(KEPHRI_REGION));
    assert!(runtime.component::<Kephri>().is_none());

    let config = PluginConfig {
        kephri_attack_counter: AttackCounterMode::Medic,
        ..PluginConfig::default()
    };
    runtime.update_config("kephri_attack_counter", config.clone());
    let kephri = runtime.component::<Kephri>().unwrap();
    assert_eq!(kephri.attacks_until_special(), Some(2));

    runtime.update_config(
        "kephri_attack_counter",
        PluginConfig {
            kephri_attack_counter: AttackCounterMode::Off,
            ..config
        },
    );
    assert!(runtime.component::<Kephri>().is_none());
}

#[test]
fn prayer_mode_off_hides_advice() {
    let mut runtime = started_runtime(PluginConfig {
        prayer_mode: PrayerMode::Off,
        ..PluginConfig::default()
    });
    runtime.on_tick(&in_region(ZEBAK_REGION));
    runtime.handle_signal(&rock(60, 100));

    assert!(runtime.prayer_advice().is_none());
    assert!(runtime.component::<Zebak>().unwrap().most_urgent().is_some());
}

#[test]
fn nothing_runs_before_start() {
    let mut runtime = PluginRuntime::with_default_components(PluginConfig::default());
    runtime.on_tick(&in_region(ZEBAK_REGION));
    assert!(runtime.active_components().is_empty());

    // Start picks up the current state
    let report = runtime.start();
    assert_eq!(report.started, vec!["zebak", "points_tracker"]);
}

#[test]
fn shutdown_stops_everything() {
    let mut runtime = started_runtime(PluginConfig::default());
    runtime.on_tick(&in_region(ZEBAK_REGION));
    runtime.handle_signal(&rock(60, 100));

    runtime.shutdown();

    assert!(runtime.active_components().is_empty());
    assert!(runtime.prayer_advice().is_none());
    assert!(runtime.roster().is_empty());
}

#[test]
fn session_survives_brief_widget_gap() {
    let mut runtime = started_runtime(PluginConfig::default());
    let antechamber = TickInput {
        region: Some(15444),
        status_widget_visible: true,
        ..TickInput::default()
    };
    let flicker = TickInput {
        status_widget_visible: false,
        ..antechamber.clone()
    };

    runtime.on_tick(&antechamber);
    runtime.on_tick(&flicker);
    runtime.on_tick(&flicker);
    runtime.on_tick(&antechamber);

    assert!(runtime.session_state().in_session);
    assert_eq!(runtime.tick(), 4);
}

#[test]
fn points_tracker_keeps_running_through_widget_gap() {
    let mut runtime = started_runtime(PluginConfig::default());
    let antechamber = TickInput {
        region: Some(15444),
        status_widget_visible: true,
        ..TickInput::default()
    };
    let flicker = TickInput {
        status_widget_visible: false,
        ..antechamber.clone()
    };

    runtime.on_tick(&antechamber);
    assert_eq!(runtime.active_components(), vec!["points_tracker"]);
    runtime.handle_signal(&GameSignal::ItemSpawned {
        item_id: item_id::MVP_ITEMS[0],
    });

    runtime.on_tick(&flicker);
    runtime.on_tick(&flicker);
    runtime.on_tick(&antechamber);

    // A restart would have reset the MVP bonus
    let tracker = runtime.component::<PointsTracker>().unwrap();
    assert_eq!(tracker.total_points(), 300);
}

#[test]
fn points_tracker_stops_when_session_ends() {
    let mut runtime = started_runtime(PluginConfig::default());
    runtime.on_tick(&in_region(ZEBAK_REGION));
    assert!(runtime.component::<PointsTracker>().is_some());

    let outside = TickInput::default();
    for _ in 0..4 {
        runtime.on_tick(&outside);
    }
    assert!(!runtime.session_state().in_session);
    assert!(runtime.component::<PointsTracker>().is_none());
}

#[test]
fn health_counter_follows_config() {
    let mut runtime = started_runtime(PluginConfig::default());
    runtime.on_tick(&in_region(ZEBAK_REGION));
    runtime.handle_signal(&GameSignal::HpHudUpdate {
        current: 900,
        maximum: 1000,
    });
    assert_eq!(runtime.health_counter(), Some(50));

    runtime.update_config(
        "health_counters",
        PluginConfig {
            health_counters: false,
            ..PluginConfig::default()
        },
    );
    assert_eq!(runtime.health_counter(), None);

    runtime.update_config("health_counters", PluginConfig::default());
    runtime.handle_signal(&GameSignal::HpHudUpdate {
        current: 900,
        maximum: 1000,
    });
    assert_eq!(runtime.health_counter(), Some(50));
}

#[test]
fn prayer_surfaces_follow_mode() {
    let mut runtime = started_runtime(PluginConfig {
        prayer_mode: PrayerMode::InfoBox,
        ..PluginConfig::default()
    });
    runtime.on_tick(&in_region(ZEBAK_REGION));
    runtime.handle_signal(&rock(60, 100));

    assert!(runtime.widget_advice().is_none());
    assert_eq!(runtime.info_box_advice().map(|a| a.prayer), Some(PrayerKind::Magic));

    runtime.update_config(
        "prayer_mode",
        PluginConfig {
            prayer_mode: PrayerMode::Widget,
            ..PluginConfig::default()
        },
    );
    assert_eq!(runtime.widget_advice().map(|a| a.prayer), Some(PrayerKind::Magic));
    assert!(runtime.info_box_advice().is_none());
}

#[test]
fn other_config_groups_are_ignored() {
    let keys = Rc::new(RefCell::new(Vec::new()));
    let listener = ConfigListener { keys: keys.clone() };
    let mut runtime = PluginRuntime::new(PluginConfig::default(), vec![Box::new(listener)]);
    runtime.start();

    runtime.handle_signal(&GameSignal::ConfigChanged {
        group: "runelite".to_string(),
        key: "fps_target".to_string(),
    });
    runtime.handle_signal(&GameSignal::ConfigChanged {
        group: CONFIG_GROUP.to_string(),
        key: "health_counters".to_string(),
    });
    runtime.update_config("prayer_mode", PluginConfig::default());

    assert_eq!(*keys.borrow(), vec!["health_counters", "prayer_mode"]);
}

#[test]
fn keeps_host_timestamp_of_last_tick() {
    let mut runtime = started_runtime(PluginConfig::default());
    let timestamp = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(20, 15, 0))
        .unwrap();

    runtime.on_tick(&TickInput {
        timestamp: Some(timestamp),
        ..in_region(ZEBAK_REGION)
    });
    assert_eq!(runtime.timestamp(), Some(timestamp));

    runtime.on_tick(&in_region(ZEBAK_REGION));
    assert_eq!(runtime.timestamp(), None);
}
