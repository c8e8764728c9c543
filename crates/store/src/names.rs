//! Generated quest board names.

use rand::Rng;
use rand::seq::IndexedRandom;

const GROUPS: [&str; 7] = [
    "Fellowship",
    "Guild",
    "Order",
    "Cabal",
    "Company",
    "Circle",
    "Band",
];

const LINKS: [&str; 2] = ["of", "of the"];

const PURSUITS: [&str; 7] = [
    "Focus",
    "Flow",
    "Momentum",
    "Milestones",
    "Endeavor",
    "Progress",
    "Quests",
];

/// Returns a name such as `The Guild of the Momentum`.
///
/// # Examples
///
/// ```
/// let name = orcganizer_store::generate_quest_board_name(&mut rand::rng());
/// assert!(name.starts_with("The "));
/// ```
pub fn generate_quest_board_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let group = GROUPS.choose(rng).copied().unwrap_or(GROUPS[0]);
    let link = LINKS.choose(rng).copied().unwrap_or(LINKS[0]);
    let pursuit = PURSUITS.choose(rng).copied().unwrap_or(PURSUITS[0]);
    format!("The {group} {link} {pursuit}")
}
