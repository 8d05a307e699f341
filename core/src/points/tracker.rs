use std::any::Any;

use amascut_types::PluginConfig;
use hashbrown::HashSet;
use phf::phf_map;

use super::{unique_chance, unique_odds};
use crate::encounters::standardize;
use crate::game_data::{EncounterId, animation_id, item_id, npc_id, varbit};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, NpcRef, SignalContext, SignalHandler};

const MESSAGE_START: &str = "you enter the tombs of amascut";
const MESSAGE_DEATH: &str = "you have died";
const MESSAGE_ROOM_FAILED: &str = "your party failed to complete";
const MESSAGE_ROOM_COMPLETE: &str = "challenge complete";

/// Every player starts with this many points; they are not counted towards loot.
const BASE_POINTS: i32 = 5_000;
const MAX_ROOM_POINTS: i32 = 20_000;
const MAX_TOTAL_POINTS: i32 = 64_000 + BASE_POINTS;

const MVP_POINTS: i32 = 300;
/// P2 warden damage stops counting after this many downs
const MAX_WARDEN_DOWNS: u32 = 3;
/// Hitsplat types of damage dealt to the wardens' cores by anyone
const WARDEN_HITSPLAT_TYPES: [u32; 2] = [53, 55];

/// Points per damage dealt, for NPCs that differ from 1.0
static DAMAGE_FACTORS: phf::Map<u32, f64> = phf_map! {
    // Cores, siphons and rolling boulders
    11770u32 => 0.0,
    11771u32 => 0.0,
    11772u32 => 0.0,
    11782u32 => 0.0,
    11783u32 => 0.0,

    // Apmeken baboons
    11709u32 => 1.2,
    11710u32 => 1.2,
    11711u32 => 1.2,
    11712u32 => 1.2,
    11713u32 => 1.2,
    11714u32 => 1.2,
    11715u32 => 1.2,
    11716u32 => 1.2,
    11717u32 => 1.2,
    11718u32 => 1.2,

    // Ba-Ba
    11778u32 => 2.0,
    11779u32 => 2.0,
    11780u32 => 2.0,

    // Zebak
    11729u32 => 1.5,
    11730u32 => 1.5,
    11732u32 => 1.5,
    11733u32 => 1.5,

    // Kephri's scarabs
    11724u32 => 0.5,
    11725u32 => 0.5,
    11726u32 => 0.5,

    // Het's seal
    11707u32 => 2.5,

    // Obelisk
    11750u32 => 1.5,
    11751u32 => 1.5,
    11752u32 => 1.5,

    // Wardens outside combat
    11746u32 => 0.0,
    11747u32 => 0.0,
    11748u32 => 0.0,
    11749u32 => 0.0,
    11759u32 => 0.0,
    11760u32 => 0.0,

    // P2 wardens, downed forms excluded
    11753u32 => 2.0,
    11754u32 => 2.0,
    11755u32 => 0.0,
    11756u32 => 2.0,
    11757u32 => 2.0,
    11758u32 => 0.0,

    // P3 wardens
    11761u32 => 2.5,
    11762u32 => 2.5,
    11763u32 => 2.5,
    11764u32 => 2.5,
};

fn is_p2_warden(npc: u32) -> bool {
    matches!(
        npc,
        npc_id::ELIDINIS_WARDEN_P2
            | npc_id::ELIDINIS_WARDEN_P2_EXPOSED
            | npc_id::ELIDINIS_WARDEN_P2_DOWNED
            | npc_id::TUMEKENS_WARDEN_P2
            | npc_id::TUMEKENS_WARDEN_P2_EXPOSED
            | npc_id::TUMEKENS_WARDEN_P2_DOWNED
    )
}

/// Points for a completed room that the party did not fight in
fn room_bonus(room: EncounterId) -> (i32, i32) {
    // (personal, non-party)
    match room {
        EncounterId::Scabaras => (300, 300),
        EncounterId::Apmeken => (450, 300),
        EncounterId::Crondis => (400, 300),
        EncounterId::Het | EncounterId::WardenP2 | EncounterId::WardenP3 => (0, 300),
        _ => (0, 0),
    }
}

/// End-of-raid report built when the sarcophagus opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaidSummary {
    pub total_points: i32,
    /// Unique chance of this raid, 0 to 1
    pub unique_chance: f64,
    /// Raids without a purple, this one included
    pub dry_streak: u32,
    pub purple: bool,
    /// Chance of at least one purple over the dry streak
    pub odds: f64,
}

pub struct PointsTracker {
    personal_total: i32,
    room_points: i32,
    /// Earned once by the whole party
    non_party_points: i32,
    raid_level: i32,
    warden_downs: u32,
    seen_mvp_items: HashSet<u32>,
    last_room: Option<EncounterId>,
    /// Survives between raids
    dry_streak: u32,
    last_summary: Option<RaidSummary>,
}

impl Default for PointsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointsTracker {
    pub fn new() -> Self {
        Self {
            personal_total: BASE_POINTS,
            room_points: 0,
            non_party_points: 0,
            raid_level: -1,
            warden_downs: 0,
            seen_mvp_items: HashSet::with_capacity(item_id::MVP_ITEMS.len()),
            last_room: None,
            dry_streak: 0,
            last_summary: None,
        }
    }

    /// Points earned in the current raid so far
    pub fn total_points(&self) -> i32 {
        (self.personal_total - BASE_POINTS) + self.room_points + self.non_party_points
    }

    pub fn room_points(&self) -> i32 {
        self.room_points
    }

    pub fn raid_level(&self) -> i32 {
        self.raid_level
    }

    pub fn unique_chance(&self) -> f64 {
        unique_chance(self.raid_level, self.total_points())
    }

    pub fn dry_streak(&self) -> u32 {
        self.dry_streak
    }

    pub fn last_summary(&self) -> Option<RaidSummary> {
        self.last_summary
    }

    fn reset(&mut self) {
        self.personal_total = BASE_POINTS;
        self.room_points = 0;
        self.non_party_points = 0;
        self.raid_level = -1;
        self.warden_downs = 0;
        self.seen_mvp_items.clear();
        self.last_room = None;
    }

    fn on_room(&mut self, room: Option<EncounterId>) {
        let Some(room) = room else {
            return;
        };
        if let Some(previous) = self.last_room.replace(room)
            && previous != room
        {
            let (personal, non_party) = room_bonus(previous);
            self.personal_total += personal;
            self.non_party_points += non_party;
            tracing::debug!(room = previous.name(), personal, non_party, "Room points awarded");
        }
    }

    fn on_chat(&mut self, message: &str) {
        let message = standardize(message);
        if message.starts_with(MESSAGE_START) {
            self.reset();
        } else if message.starts_with(MESSAGE_DEATH) {
            let penalty = (0.2 * f64::from(self.personal_total)).max(1_000.0);
            self.personal_total = ((f64::from(self.personal_total) - penalty) as i32).max(0);
        } else if message.starts_with(MESSAGE_ROOM_FAILED) {
            self.warden_downs = 0;
            self.room_points = 0;
        } else if message.starts_with(MESSAGE_ROOM_COMPLETE) {
            self.personal_total = MAX_TOTAL_POINTS.min(self.personal_total + self.room_points);
            self.room_points = 0;
        }
    }

    fn on_hitsplat(&mut self, npc: &NpcRef, amount: i32, mine: bool, hitsplat_type: u32) {
        if amount < 1 {
            return;
        }
        if is_p2_warden(npc.id) && self.warden_downs > MAX_WARDEN_DOWNS {
            return;
        }
        if !mine && !WARDEN_HITSPLAT_TYPES.contains(&hitsplat_type) {
            return;
        }

        let factor = DAMAGE_FACTORS.get(&npc.id).copied().unwrap_or(1.0);
        let earned = f64::from(self.room_points) + f64::from(amount) * factor;
        self.room_points = earned.min(f64::from(MAX_ROOM_POINTS)) as i32;
    }

    fn on_item(&mut self, item: u32) {
        if item_id::MVP_ITEMS.contains(&item) && self.seen_mvp_items.insert(item) {
            self.personal_total += MVP_POINTS;
        }
    }

    fn on_sarcophagus(&mut self, purple: bool) {
        let dry_streak = self.dry_streak + 1;
        let unique_chance = self.unique_chance();
        let summary = RaidSummary {
            total_points: self.total_points(),
            unique_chance,
            dry_streak,
            purple,
            odds: unique_odds(unique_chance, dry_streak),
        };
        tracing::info!(
            total_points = summary.total_points,
            unique_chance = %format!("{:.2}%", summary.unique_chance * 100.0),
            dry_streak,
            purple,
            odds = %format!("{:.2}%", summary.odds * 100.0),
            "Sarcophagus opened"
        );

        self.dry_streak = if purple { 0 } else { dry_streak };
        self.last_summary = Some(summary);
    }
}

impl SignalHandler for PointsTracker {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        match signal {
            GameSignal::GameTick { .. } => self.on_room(ctx.state.encounter),
            GameSignal::ChatMessage { message } => self.on_chat(message),
            GameSignal::HitsplatApplied {
                npc,
                amount,
                mine,
                hitsplat_type,
            } => self.on_hitsplat(npc, *amount, *mine, *hitsplat_type),
            GameSignal::ItemSpawned { item_id } => self.on_item(*item_id),
            GameSignal::AnimationChanged { npc, animation_id }
                if is_p2_warden(npc.id) && *animation_id == animation_id::WARDEN_DOWN =>
            {
                self.warden_downs += 1;
            }
            GameSignal::VarbitChanged { varbit, value } if *varbit == varbit::TOA_RAID_LEVEL => {
                self.raid_level = *value;
            }
            GameSignal::SarcophagusOpened { purple } => self.on_sarcophagus(*purple),
            _ => {}
        }
    }
}

impl LifecycleComponent for PointsTracker {
    fn name(&self) -> &'static str {
        "points_tracker"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.in_session
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounters::test_support::{chat, ctx_for, game_tick, npc};

    fn hit(id: u32, amount: i32) -> GameSignal {
        GameSignal::HitsplatApplied {
            npc: npc(40, id, ""),
            amount,
            mine: true,
            hitsplat_type: 0,
        }
    }

    #[test]
    fn damage_scales_by_target() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::Zebak);
        let ctx = state.ctx(&config);

        tracker.handle_signal(&hit(npc_id::ZEBAK, 100), &ctx);
        tracker.handle_signal(&hit(npc_id::WARDEN_CORE, 100), &ctx);
        tracker.handle_signal(&hit(1, 10), &ctx);
        tracker.handle_signal(&hit(1, 0), &ctx);
        assert_eq!(tracker.room_points(), 160);

        // Another player's plain hit is not ours
        tracker.handle_signal(
            &GameSignal::HitsplatApplied {
                npc: npc(40, 1, ""),
                amount: 50,
                mine: false,
                hitsplat_type: 1,
            },
            &ctx,
        );
        assert_eq!(tracker.room_points(), 160);
    }

    #[test]
    fn room_points_cap_and_bank_on_completion() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);

        tracker.handle_signal(&hit(npc_id::BABA, 15_000), &ctx);
        assert_eq!(tracker.room_points(), MAX_ROOM_POINTS);

        tracker.handle_signal(&chat("Challenge complete: Ba-Ba. Duration: 2:01"), &ctx);
        assert_eq!(tracker.room_points(), 0);
        assert_eq!(tracker.total_points(), MAX_ROOM_POINTS);
    }

    #[test]
    fn failed_room_discards_points() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::Zebak);
        let ctx = state.ctx(&config);

        tracker.handle_signal(&hit(1, 500), &ctx);
        tracker.handle_signal(&chat("Your party failed to complete the challenge."), &ctx);
        assert_eq!(tracker.total_points(), 0);
    }

    #[test]
    fn death_costs_a_fifth_or_at_least_a_thousand() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::Zebak);
        let ctx = state.ctx(&config);

        // 5000 base: 1000 penalty leaves 4000
        tracker.handle_signal(&chat("You have died."), &ctx);
        assert_eq!(tracker.total_points(), -1_000);

        tracker.handle_signal(&hit(1, 16_000), &ctx);
        tracker.handle_signal(&chat("Challenge complete: Zebak."), &ctx);
        // 20000 * 0.2 = 4000
        tracker.handle_signal(&chat("You have died."), &ctx);
        assert_eq!(tracker.total_points(), 16_000 - 5_000);
    }

    #[test]
    fn mvp_items_count_once() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::Zebak);
        let ctx = state.ctx(&config);

        for item in [27219, 27219, 27220, 995] {
            tracker.handle_signal(&GameSignal::ItemSpawned { item_id: item }, &ctx);
        }
        assert_eq!(tracker.total_points(), 600);
    }

    #[test]
    fn leaving_a_path_awards_puzzle_points() {
        let mut tracker = PointsTracker::new();
        let (mut state, config) = ctx_for(EncounterId::Apmeken);

        tracker.handle_signal(&game_tick(), &state.ctx(&config));
        state.state.encounter = None;
        tracker.handle_signal(&game_tick(), &state.ctx(&config));
        assert_eq!(tracker.total_points(), 0);

        state.state.encounter = Some(EncounterId::BaBa);
        tracker.handle_signal(&game_tick(), &state.ctx(&config));
        assert_eq!(tracker.total_points(), 750);

        state.state.encounter = Some(EncounterId::Nexus);
        tracker.handle_signal(&game_tick(), &state.ctx(&config));
        assert_eq!(tracker.total_points(), 750);
    }

    #[test]
    fn p2_warden_damage_stops_after_downs() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::WardenP2);
        let ctx = state.ctx(&config);
        let warden = npc(50, npc_id::TUMEKENS_WARDEN_P2, "Tumeken's Warden");
        let core_hit = GameSignal::HitsplatApplied {
            npc: warden.clone(),
            amount: 10,
            mine: false,
            hitsplat_type: 53,
        };

        tracker.handle_signal(&core_hit, &ctx);
        assert_eq!(tracker.room_points(), 20);

        for _ in 0..4 {
            tracker.handle_signal(
                &GameSignal::AnimationChanged {
                    npc: warden.clone(),
                    animation_id: animation_id::WARDEN_DOWN,
                },
                &ctx,
            );
        }
        tracker.handle_signal(&core_hit, &ctx);
        assert_eq!(tracker.room_points(), 20);
    }

    #[test]
    fn sarcophagus_reports_and_tracks_dry_streak() {
        let mut tracker = PointsTracker::new();
        let (state, config) = ctx_for(EncounterId::Tomb);
        let ctx = state.ctx(&config);

        tracker.handle_signal(
            &GameSignal::VarbitChanged {
                varbit: varbit::TOA_RAID_LEVEL,
                value: 300,
            },
            &ctx,
        );
        tracker.handle_signal(&hit(1, 4_500), &ctx);
        tracker.handle_signal(&GameSignal::SarcophagusOpened { purple: false }, &ctx);

        let summary = tracker.last_summary().unwrap();
        assert_eq!(summary.total_points, 4_500);
        assert!((summary.unique_chance - 0.01).abs() < 1e-9);
        assert_eq!(summary.dry_streak, 1);
        assert_eq!(tracker.dry_streak(), 1);

        // New raid keeps the streak
        tracker.handle_signal(&chat("You enter the Tombs of Amascut..."), &ctx);
        tracker.handle_signal(&GameSignal::SarcophagusOpened { purple: true }, &ctx);
        let summary = tracker.last_summary().unwrap();
        assert_eq!(summary.dry_streak, 2);
        assert!(summary.purple);
        assert_eq!(tracker.dry_streak(), 0);
        assert_eq!(tracker.raid_level(), -1);
    }
}
