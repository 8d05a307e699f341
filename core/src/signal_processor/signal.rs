use amascut_types::CONFIG_GROUP;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A tile position in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub plane: u8,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: u8) -> Self {
        Self { x, y, plane }
    }

    /// Chebyshev distance in tiles, ignoring the plane.
    pub fn distance_to_2d(&self, other: &WorldPoint) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

/// Identity of an NPC as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcRef {
    /// Scene index; stable while the NPC is spawned
    pub index: u32,
    /// NPC definition ID (changes on form change)
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Discrete events delivered by the host between ticks.
///
/// Signals for a tick always arrive before that tick's `GameTick`, which is
/// the point where queues decay and overlays are queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameSignal {
    /// Tick settle. Dispatched by the runtime after the detector has run.
    GameTick {
        tick: u64,
    },

    // Hazards
    ProjectileMoved {
        projectile_id: u32,
        /// Client cycles until impact; may be negative for late deliveries
        remaining_cycles: i32,
        /// Cycle the projectile was launched on; stable across repeats
        start_cycle: i32,
        origin: WorldPoint,
        /// Aimed at a player other than the local one
        #[serde(default)]
        targets_other_player: bool,
    },
    GraphicsObjectCreated {
        id: u32,
        location: WorldPoint,
    },
    /// A graphics object reported by `GraphicsObjectCreated` finished playing.
    /// Hosts poll for this once per tick, before the tick settles.
    GraphicsObjectFinished {
        id: u32,
        location: WorldPoint,
    },
    GameObjectSpawned {
        id: u32,
        location: WorldPoint,
        /// Animation of the object's dynamic renderable
        #[serde(default)]
        animation_id: Option<u32>,
    },

    // NPC lifecycle
    NpcSpawned {
        npc: NpcRef,
    },
    NpcDespawned {
        npc: NpcRef,
    },
    NpcChanged {
        npc: NpcRef,
        old_id: u32,
    },
    AnimationChanged {
        npc: NpcRef,
        animation_id: u32,
    },
    ActorDeath {
        npc: NpcRef,
    },
    HitsplatApplied {
        npc: NpcRef,
        amount: i32,
        /// Dealt by the local player
        #[serde(default)]
        mine: bool,
        #[serde(default)]
        hitsplat_type: u32,
    },

    // Loot and progress
    ItemSpawned {
        item_id: u32,
    },
    VarbitChanged {
        varbit: u32,
        value: i32,
    },
    /// The reward chest was opened at the end of the raid
    SarcophagusOpened {
        purple: bool,
    },

    // UI
    ChatMessage {
        message: String,
    },
    /// Boss HP bar in the HUD
    HpHudUpdate {
        current: i32,
        maximum: i32,
    },
    WidgetLoaded {
        group_id: u32,
        /// Child index to text for the children the host could read
        #[serde(default)]
        texts: Vec<(u32, String)>,
    },

    ConfigChanged {
        /// Owning config group; changes to other groups are ignored
        #[serde(default = "default_config_group")]
        group: String,
        key: String,
    },
}

fn default_config_group() -> String {
    CONFIG_GROUP.to_string()
}

/// Per-tick positional and UI sample polled from the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Map region of the local player; `None` when the position is unavailable
    #[serde(default)]
    pub region: Option<u32>,
    /// Raid status widget is present and not hidden
    #[serde(default)]
    pub status_widget_visible: bool,
    #[serde(default)]
    pub player_location: Option<WorldPoint>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}
