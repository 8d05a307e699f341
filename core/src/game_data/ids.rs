// Game object IDs referenced by the encounter modules.
// Not exhaustive: only IDs something in the crate reacts to.

pub mod npc_id {
    pub const ZEBAK: u32 = 11730;
    pub const AKKHA_MELEE: u32 = 11790;
    pub const AKKHA_RANGE: u32 = 11791;
    pub const AKKHA_MAGE: u32 = 11792;
    pub const KEPHRI_DOWNED: u32 = 11722;
    pub const KEPHRI_EGG: u32 = 11728;
    pub const ELIDINIS_WARDEN_P2: u32 = 11753;
    pub const ELIDINIS_WARDEN_P2_EXPOSED: u32 = 11754;
    pub const TUMEKENS_WARDEN_P2: u32 = 11756;
    pub const TUMEKENS_WARDEN_P2_EXPOSED: u32 = 11757;
    pub const ELIDINIS_WARDEN_P3: u32 = 11761;
    pub const TUMEKENS_WARDEN_P3: u32 = 11762;
    pub const ELIDINIS_WARDEN_P3_CHARGING: u32 = 11763;
    pub const TUMEKENS_WARDEN_P3_CHARGING: u32 = 11764;
    pub const AKKHAS_PHANTOM: u32 = 11767;
    pub const WARDEN_CORE: u32 = 11770;
    pub const WARDEN_CORE_ALT: u32 = 11771;
    pub const ENERGY_SIPHON: u32 = 11772;
    pub const ENERGY_SIPHON_DEAD: u32 = 11773;

    pub const BABA: u32 = 11778;
    pub const BABA_COFFIN: u32 = 11779;
    pub const BABA_DIGGING: u32 = 11780;
    pub const BABOON: u32 = 11781;
    pub const BOULDER: u32 = 11782;
    pub const BOULDER_WEAKENED: u32 = 11783;
    pub const RUBBLE: u32 = 11784;
    pub const UNSTABLE_ORB: u32 = 11804;

    pub const BABOON_BRAWLER: u32 = 11709;
    pub const BABOON_THROWER: u32 = 11710;
    pub const BABOON_MAGE: u32 = 11711;
    pub const BABOON_BRAWLER_ALT: u32 = 11712;
    pub const BABOON_THROWER_ALT: u32 = 11713;
    pub const BABOON_MAGE_ALT: u32 = 11714;
    pub const BABOON_SHAMAN: u32 = 11715;
    pub const VOLATILE_BABOON: u32 = 11716;
    pub const CURSED_BABOON: u32 = 11717;
    pub const BABOON_THRALL: u32 = 11718;

    pub const HETS_SEAL_WEAKENED: u32 = 11707;
    pub const ZEBAK_BASE: u32 = 11729;
    pub const ZEBAK_ENRAGED: u32 = 11732;
    pub const ZEBAK_DYING: u32 = 11733;
    pub const SOLDIER_SCARAB: u32 = 11724;
    pub const SPITTING_SCARAB: u32 = 11725;
    pub const ARCANE_SCARAB: u32 = 11726;

    /// Wardens before P2 starts (P1 obelisk phase and transitions)
    pub const ELIDINIS_WARDEN_INACTIVE: [u32; 3] = [11746, 11748, 11759];
    pub const TUMEKENS_WARDEN_INACTIVE: [u32; 3] = [11747, 11749, 11760];
    pub const OBELISK: [u32; 3] = [11750, 11751, 11752];
    pub const ELIDINIS_WARDEN_P2_DOWNED: u32 = 11755;
    pub const TUMEKENS_WARDEN_P2_DOWNED: u32 = 11758;
}

pub mod npc_name {
    pub const ZEBAK: &str = "Zebak";
    pub const AKKHA: &str = "Akkha";
    pub const KEPHRI: &str = "Kephri";
    pub const BABA: &str = "Ba-Ba";
}

pub mod projectile_id {
    pub const ZEBAK_MAGIC_ROCK: u32 = 2176;
    pub const ZEBAK_MAGIC_ROCK_ENRAGED: u32 = 2177;
    pub const ZEBAK_RANGE_ROCK: u32 = 2178;
    pub const ZEBAK_RANGE_ROCK_ENRAGED: u32 = 2179;

    pub const WARDEN_ARCANE_SCIMITAR: u32 = 2204;
    pub const WARDEN_WHITE_ARROW: u32 = 2206;
    pub const WARDEN_BLUE_SPELL: u32 = 2208;
    pub const WARDEN_RED_SKULL: u32 = 2224;
    pub const WARDEN_WHITE_SKULL: u32 = 2241;

    pub const BABA_SARCOPHAGUS: u32 = 2246;
}

pub mod graphics_id {
    pub const ZEBAK_BLOOD_MAGIC: u32 = 377;
    pub const FALLING_BOULDER: u32 = 2250;
    pub const FALLING_BOULDER_ALT: u32 = 2251;
    pub const RED_LIGHTNING: u32 = 1446;
    pub const BABA_SHOCKWAVE_SMALL: u32 = 1447;
    pub const BABA_SHOCKWAVE_LARGE: u32 = 1448;

    /// Akkha memory blast detonations, one per element
    pub const AKKHA_MEMORY_ELEMENTS: [u32; 4] = [2256, 2257, 2258, 2259];
}

pub mod object_id {
    pub const AKKHA_FIRE_SYMBOL: u32 = 45868;
    pub const AKKHA_LIGHTNING_SYMBOL: u32 = 45869;
    pub const AKKHA_STAR_SYMBOL: u32 = 45870;
    pub const AKKHA_DEATH_SYMBOL: u32 = 45871;
}

pub mod item_id {
    /// Dropped by the MVP of each path boss; worth bonus points once per raid
    pub const MVP_ITEMS: [u32; 4] = [27219, 27220, 27221, 27222];
}

pub mod varbit {
    pub const TOA_RAID_LEVEL: u32 = 14380;
}

pub mod animation_id {
    pub const AKKHA_MELEE: u32 = 9770;
    pub const AKKHA_MISSILES: u32 = 9772;
    pub const AKKHA_MAGIC: u32 = 9774;
    pub const AKKHA_STYLE_SWITCH: u32 = 9777;

    pub const KEPHRI_FIREBALL: u32 = 9577;
    pub const KEPHRI_SPECIAL: u32 = 9578;
    pub const KEPHRI_INACTIVE: u32 = 9579;

    pub const AKKHA_SYMBOL_GLOW: u32 = 9759;
    pub const WARDEN_DOWN: u32 = 9670;

    /// Slam animations come in Elidinis/Tumeken pairs
    pub const WARDEN_SLAM_RIGHT: [u32; 2] = [9674, 9675];
    pub const WARDEN_SLAM_LEFT: [u32; 2] = [9676, 9677];
    pub const WARDEN_SLAM_MIDDLE: [u32; 2] = [9678, 9679];
}

pub mod widget {
    /// Raid status widget; visible while inside an instance
    pub const STATUS_GROUP: u32 = 481;
    pub const STATUS_CHILD: u32 = 40;

    /// Nexus path level display
    pub const RAID_GROUP: u32 = 773;
    pub const CHILD_KEPHRI_LEVEL: u32 = 49;
    pub const CHILD_AKKHA_LEVEL: u32 = 51;
    pub const CHILD_BABA_LEVEL: u32 = 53;
    pub const CHILD_ZEBAK_LEVEL: u32 = 55;
}
