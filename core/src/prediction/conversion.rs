use crate::game_data::CYCLES_PER_TICK;

/// Converts a remaining-duration measure in client cycles into whole ticks.
///
/// `ticks = (cycles + distance * cycles_per_tile) / cycles_per_tick + 1`
///
/// The `+ 1` rounds toward warning early. A negative total clamps to zero
/// ticks, which queues treat as already landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConversion {
    pub cycles_per_tick: u32,
    /// Extra travel cycles per tile of distance; zero disables compensation
    pub cycles_per_tile: u32,
}

impl Default for TickConversion {
    fn default() -> Self {
        Self {
            cycles_per_tick: CYCLES_PER_TICK,
            cycles_per_tile: 0,
        }
    }
}

impl TickConversion {
    /// Conversion with travel-distance compensation
    pub fn travelling(cycles_per_tile: u32) -> Self {
        Self {
            cycles_per_tile,
            ..Self::default()
        }
    }

    pub fn cycles_to_ticks(&self, remaining_cycles: i32, distance_tiles: u32) -> u32 {
        let travel = i64::from(distance_tiles) * i64::from(self.cycles_per_tile);
        let total = i64::from(remaining_cycles) + travel;
        if total < 0 || self.cycles_per_tick == 0 {
            return 0;
        }
        let ticks = total / i64::from(self.cycles_per_tick) + 1;
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}
