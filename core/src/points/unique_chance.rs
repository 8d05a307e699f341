const BASE_RATE: f64 = 10_500.0;
const RAID_LEVEL_MODIFIER: f64 = 20.0;
/// Raid levels above this count a third as much
const RAID_LEVEL_REDUCE_FLOOR: i32 = 400;
const RAID_LEVEL_MAX: i32 = 550;
const MAX_RATE_PERCENT: f64 = 55.0;

/// Chance (0 to 1) that a raid at `raid_level` worth `points` rolls a unique.
pub fn unique_chance(raid_level: i32, points: i32) -> f64 {
    let mut modifier = RAID_LEVEL_MODIFIER * f64::from(raid_level.min(RAID_LEVEL_REDUCE_FLOOR));
    if raid_level > RAID_LEVEL_REDUCE_FLOOR {
        let reduced = raid_level.min(RAID_LEVEL_MAX) - RAID_LEVEL_REDUCE_FLOOR;
        modifier += f64::from(reduced) * RAID_LEVEL_MODIFIER / 3.0;
    }

    let percent = f64::from(points) / (BASE_RATE - modifier);
    percent.clamp(0.0, MAX_RATE_PERCENT) / 100.0
}

/// Chance of at least one unique over `kc` raids at `chance` each.
pub fn unique_odds(chance: f64, kc: u32) -> f64 {
    1.0 - (1.0 - chance).powf(f64::from(kc))
}
