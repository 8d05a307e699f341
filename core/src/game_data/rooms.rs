//! Raid room identification
//!
//! Maps map-region IDs to the sub-encounter the player is standing in.
//! A region that is not in the table (antechambers, scripted transitions,
//! anywhere outside the raid) resolves to `None`.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Region ID of the raid lobby (outside the instance).
pub const REGION_LOBBY: u32 = 13454;

/// Tracked sub-encounters inside the raid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterId {
    Nexus,
    Crondis,
    Zebak,
    Scabaras,
    Kephri,
    Apmeken,
    BaBa,
    Het,
    Akkha,
    WardenP1,
    WardenP2,
    WardenP3,
    Tomb,
}

impl EncounterId {
    /// Resolve a region ID to an encounter.
    pub fn from_region(region: u32) -> Option<Self> {
        REGION_ENCOUNTERS.get(&region).copied()
    }

    /// Display name used in logs and the CLI
    pub fn name(&self) -> &'static str {
        match self {
            EncounterId::Nexus => "Nexus",
            EncounterId::Crondis => "Path of Crondis",
            EncounterId::Zebak => "Zebak",
            EncounterId::Scabaras => "Path of Scabaras",
            EncounterId::Kephri => "Kephri",
            EncounterId::Apmeken => "Path of Apmeken",
            EncounterId::BaBa => "Ba-Ba",
            EncounterId::Het => "Path of Het",
            EncounterId::Akkha => "Akkha",
            EncounterId::WardenP1 => "Wardens (P1)",
            EncounterId::WardenP2 => "Wardens (P2)",
            EncounterId::WardenP3 => "Wardens (P3)",
            EncounterId::Tomb => "Tomb",
        }
    }
}

/// Region lookup table indexed by region ID
static REGION_ENCOUNTERS: phf::Map<u32, EncounterId> = phf_map! {
    14160u32 => EncounterId::Nexus,

    // Crondis / Zebak
    15698u32 => EncounterId::Crondis,
    15700u32 => EncounterId::Zebak,

    // Scabaras / Kephri
    14162u32 => EncounterId::Scabaras,
    14164u32 => EncounterId::Kephri,

    // Apmeken / Ba-Ba
    15186u32 => EncounterId::Apmeken,
    15188u32 => EncounterId::BaBa,

    // Het / Akkha
    14674u32 => EncounterId::Het,
    14676u32 => EncounterId::Akkha,

    // Wardens
    15184u32 => EncounterId::WardenP1,
    15696u32 => EncounterId::WardenP2,
    15952u32 => EncounterId::WardenP3,

    14672u32 => EncounterId::Tomb,
};
