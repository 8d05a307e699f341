//! Encounter modules
//!
//! Leaf feature modules, each a [`LifecycleComponent`] active in one raid
//! room. Queue-owning modules build on [`AttackPredictionQueue`].
//!
//! [`LifecycleComponent`]: crate::lifecycle::LifecycleComponent
//! [`AttackPredictionQueue`]: crate::prediction::AttackPredictionQueue

mod akkha;
mod akkha_final_stand;
mod akkha_memory_blast;
mod baba;
mod countdown;
mod health;
mod kephri;
mod path_level;
mod warden_p2;
mod warden_p3;
mod zebak;

#[cfg(test)]
pub(crate) mod test_support;

pub use akkha::{Akkha, AttackStyle};
pub use akkha_final_stand::AkkhaFinalStand;
pub use akkha_memory_blast::AkkhaMemoryBlast;
pub use baba::{BaBa, Shockwave};
pub use countdown::TickCountdowns;
pub use health::BossHealth;
pub use kephri::{AttackCounter, Kephri};
pub use path_level::{PathLevelHandle, PathLevelTracker, PathLevels};
pub use warden_p2::WardenP2;
pub use warden_p3::{SlamDirection, WardenP3};
pub use zebak::Zebak;

use crate::lifecycle::LifecycleComponent;
use crate::points::PointsTracker;

/// Every registered component, wired to a shared path level handle.
///
/// Akkha's sub-modules depend on `akkha` and are registered after it.
pub fn default_components() -> Vec<Box<dyn LifecycleComponent>> {
    let path_levels = PathLevelHandle::new();
    vec![
        Box::new(PathLevelTracker::new(path_levels.clone())),
        Box::new(Zebak::new(path_levels.clone())),
        Box::new(Kephri::new()),
        Box::new(BaBa::new()),
        Box::new(Akkha::new()),
        Box::new(AkkhaFinalStand::new()),
        Box::new(AkkhaMemoryBlast::new()),
        Box::new(WardenP2::new()),
        Box::new(WardenP3::new(path_levels)),
        Box::new(PointsTracker::new()),
    ]
}

/// Lowercase a chat message and strip formatting tags.
pub(crate) fn standardize(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut in_tag = false;
    for ch in message.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.extend(ch.to_lowercase()),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Challenge start or party failure: predictions from the previous attempt
/// no longer apply.
pub(crate) fn is_challenge_boundary(message: &str) -> bool {
    let message = standardize(message);
    message.starts_with("challenge started")
        || message.starts_with("your party failed to complete the challenge")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardize_strips_tags() {
        assert_eq!(
            standardize("<col=ff0000>Challenge started: Akkha.</col> "),
            "challenge started: akkha."
        );
    }

    #[test]
    fn challenge_boundaries() {
        assert!(is_challenge_boundary("Challenge started: Zebak."));
        assert!(is_challenge_boundary(
            "Your party failed to complete the challenge. You may try again..."
        ));
        assert!(!is_challenge_boundary("Challenge complete: Zebak."));
    }

    #[test]
    fn default_components_have_unique_names() {
        let components = default_components();
        let mut names: Vec<_> = components.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), components.len());
    }

    #[test]
    fn dependencies_registered_first() {
        let components = default_components();
        for (idx, component) in components.iter().enumerate() {
            for dependency in component.dependencies() {
                assert!(
                    components[..idx].iter().any(|c| c.name() == *dependency),
                    "{} registered before {dependency}",
                    component.name()
                );
            }
        }
    }
}
