use std::any::Any;

use amascut_types::PluginConfig;

use super::{BossHealth, standardize};
use crate::game_data::{EncounterId, animation_id, npc_id, npc_name};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::prediction::{PrayerAdvice, PrayerKind};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler};

const HP_BREAKPOINTS: &[f64] = &[0.8, 0.6, 0.4, 0.2];

/// Ticks between Akkha's attacks
const ATTACK_TICKS: u32 = 6;

const MESSAGE_START: &str = "challenge started: akkha.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackStyle {
    #[default]
    Melee,
    Range,
    Mage,
}

impl AttackStyle {
    pub fn prayer(&self) -> PrayerKind {
        match self {
            AttackStyle::Melee => PrayerKind::Melee,
            AttackStyle::Range => PrayerKind::Missiles,
            AttackStyle::Mage => PrayerKind::Magic,
        }
    }

    fn from_form(npc: u32) -> Option<Self> {
        match npc {
            npc_id::AKKHA_MELEE => Some(AttackStyle::Melee),
            npc_id::AKKHA_RANGE => Some(AttackStyle::Range),
            npc_id::AKKHA_MAGE => Some(AttackStyle::Mage),
            _ => None,
        }
    }

    fn from_attack(animation: u32) -> Option<Self> {
        match animation {
            animation_id::AKKHA_MELEE => Some(AttackStyle::Melee),
            animation_id::AKKHA_MISSILES => Some(AttackStyle::Range),
            animation_id::AKKHA_MAGIC => Some(AttackStyle::Mage),
            _ => None,
        }
    }
}

pub struct Akkha {
    npc_index: Option<u32>,
    /// Last animation played by Akkha
    animation: Option<u32>,
    style: AttackStyle,
    ticks_until_next_attack: u32,
    health: BossHealth,
}

impl Default for Akkha {
    fn default() -> Self {
        Self::new()
    }
}

impl Akkha {
    pub fn new() -> Self {
        Self {
            npc_index: None,
            animation: None,
            style: AttackStyle::Melee,
            ticks_until_next_attack: 0,
            health: BossHealth::new(HP_BREAKPOINTS),
        }
    }

    pub fn attack_style(&self) -> AttackStyle {
        self.style
    }

    pub fn ticks_until_next_attack(&self) -> u32 {
        self.ticks_until_next_attack
    }

    /// Prayer for the incoming attack. A magic or ranged animation in
    /// progress overrides the current form.
    pub fn prayer(&self) -> PrayerKind {
        match self.animation {
            Some(animation_id::AKKHA_MAGIC) => PrayerKind::Magic,
            Some(animation_id::AKKHA_MISSILES) => PrayerKind::Missiles,
            _ => self.style.prayer(),
        }
    }

    fn reset(&mut self) {
        self.npc_index = None;
        self.animation = None;
        self.style = AttackStyle::Melee;
        self.ticks_until_next_attack = 0;
        self.health.reset();
    }

    fn is_akkha(&self, index: u32) -> bool {
        self.npc_index == Some(index)
    }
}

impl SignalHandler for Akkha {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        self.health.on_signal(signal, ctx.config);
        match signal {
            GameSignal::GameTick { .. } => {
                self.ticks_until_next_attack = self.ticks_until_next_attack.saturating_sub(1);
            }
            GameSignal::NpcSpawned { npc } if npc.name == npc_name::AKKHA => {
                self.npc_index = Some(npc.index);
            }
            GameSignal::NpcDespawned { npc } if self.is_akkha(npc.index) => {
                self.npc_index = None;
                self.animation = None;
            }
            GameSignal::NpcChanged { npc, .. } if self.is_akkha(npc.index) => {
                if let Some(style) = AttackStyle::from_form(npc.id) {
                    tracing::debug!(?style, "Akkha changed form");
                    self.style = style;
                }
            }
            GameSignal::AnimationChanged { npc, animation_id } if self.is_akkha(npc.index) => {
                self.animation = Some(*animation_id);
                if let Some(style) = AttackStyle::from_attack(*animation_id) {
                    self.style = style;
                    self.ticks_until_next_attack = ATTACK_TICKS;
                }
            }
            GameSignal::ChatMessage { message } if standardize(message) == MESSAGE_START => {
                self.style = AttackStyle::Melee;
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for Akkha {
    fn name(&self) -> &'static str {
        "akkha"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::Akkha)
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn prayer_advice(&self, config: &PluginConfig) -> Option<PrayerAdvice> {
        if !config.akkha_prayer_indicator || self.npc_index.is_none() {
            return None;
        }
        Some(PrayerAdvice {
            prayer: self.prayer(),
            ticks: (self.ticks_until_next_attack > 0).then_some(self.ticks_until_next_attack),
            source: self.name(),
        })
    }

    fn hp_until_next_breakpoint(&self) -> Option<i32> {
        self.health.hp_until_next_breakpoint()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounters::test_support::{chat, ctx_for, game_tick, npc};
    use crate::signal_processor::NpcRef;

    fn spawned() -> (Akkha, NpcRef) {
        let mut akkha = Akkha::new();
        let boss = npc(7, npc_id::AKKHA_MELEE, "Akkha");
        let (state, config) = ctx_for(EncounterId::Akkha);
        akkha.handle_signal(&GameSignal::NpcSpawned { npc: boss.clone() }, &state.ctx(&config));
        (akkha, boss)
    }

    #[test]
    fn attack_animation_sets_style_and_timer() {
        let (mut akkha, boss) = spawned();
        let (state, config) = ctx_for(EncounterId::Akkha);
        let ctx = state.ctx(&config);

        akkha.handle_signal(
            &GameSignal::AnimationChanged {
                npc: boss,
                animation_id: animation_id::AKKHA_MAGIC,
            },
            &ctx,
        );
        assert_eq!(akkha.attack_style(), AttackStyle::Mage);
        assert_eq!(akkha.ticks_until_next_attack(), 6);

        akkha.handle_signal(&game_tick(), &ctx);
        assert_eq!(akkha.ticks_until_next_attack(), 5);

        let advice = akkha.prayer_advice(&config).unwrap();
        assert_eq!(advice.prayer, PrayerKind::Magic);
        assert_eq!(advice.ticks, Some(5));
    }

    #[test]
    fn form_change_switches_style() {
        let (mut akkha, boss) = spawned();
        let (state, config) = ctx_for(EncounterId::Akkha);

        let ranged = NpcRef { id: npc_id::AKKHA_RANGE, ..boss };
        akkha.handle_signal(
            &GameSignal::NpcChanged {
                npc: ranged,
                old_id: npc_id::AKKHA_MELEE,
            },
            &state.ctx(&config),
        );

        assert_eq!(akkha.attack_style(), AttackStyle::Range);
        assert_eq!(akkha.prayer(), PrayerKind::Missiles);
    }

    #[test]
    fn other_npcs_are_ignored() {
        let (mut akkha, _) = spawned();
        let (state, config) = ctx_for(EncounterId::Akkha);

        akkha.handle_signal(
            &GameSignal::AnimationChanged {
                npc: npc(8, 1, "Akkha's Shadow"),
                animation_id: animation_id::AKKHA_MAGIC,
            },
            &state.ctx(&config),
        );
        assert_eq!(akkha.attack_style(), AttackStyle::Melee);
        assert_eq!(akkha.ticks_until_next_attack(), 0);
    }

    #[test]
    fn challenge_start_resets_to_melee() {
        let (mut akkha, boss) = spawned();
        let (state, config) = ctx_for(EncounterId::Akkha);
        let ctx = state.ctx(&config);

        akkha.handle_signal(
            &GameSignal::NpcChanged {
                npc: NpcRef { id: npc_id::AKKHA_MAGE, ..boss },
                old_id: npc_id::AKKHA_MELEE,
            },
            &ctx,
        );
        akkha.handle_signal(&chat("Challenge started: Akkha."), &ctx);

        assert_eq!(akkha.attack_style(), AttackStyle::Melee);
    }

    #[test]
    fn no_advice_without_akkha() {
        let akkha = Akkha::new();
        assert_eq!(akkha.prayer_advice(&PluginConfig::default()), None);
    }
}
