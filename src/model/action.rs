//! Tracked game actions and the phrase tables that recognise them.
//!
//! Every action carries a stable numeric code that is persisted inside counter records.
//! Codes are grouped so that joint hunts live in 1..=9, individual hunts in 10..=99 and
//! epic events in 100..=199, but the class of an action is always read from
//! [`TrackedAction::class`] rather than inferred from its code.

/// Grouping used for leaderboards, milestones and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionClass {
    /// Hunts performed together with another player.
    Joint,
    /// Solo hunts.
    Individual,
    /// Epic item events (baits, seeds, trumpets).
    Epic,
}

impl ActionClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Joint => "together",
            Self::Individual => "individual",
            Self::Epic => "epic",
        }
    }

    /// Joint and individual hunts share the hunt leaderboards.
    pub fn is_hunt(self) -> bool {
        matches!(self, Self::Joint | Self::Individual)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedAction {
    HuntTogether,
    HuntHardmodeTogether,
    AscendedHuntHardmodeTogether,
    Hunt,
    HuntHardmode,
    HuntH,
    AscendedHuntHardmode,
    AscendedHuntH,
    UltraBait,
    EpicSeed,
    CoinTrumpet,
}

/// Recognised hunt phrases (after the game prefix) and the action they count as.
const HUNT_PHRASES: &[(&str, TrackedAction)] = &[
    ("hunt together", TrackedAction::HuntTogether),
    ("hunt t", TrackedAction::HuntTogether),
    ("hunt hardmode together", TrackedAction::HuntHardmodeTogether),
    ("hunt together hardmode", TrackedAction::HuntHardmodeTogether),
    ("hunt h t", TrackedAction::HuntHardmodeTogether),
    ("hunt t h", TrackedAction::HuntHardmodeTogether),
    (
        "ascended hunt hardmode together",
        TrackedAction::AscendedHuntHardmodeTogether,
    ),
    (
        "ascended hunt together hardmode",
        TrackedAction::AscendedHuntHardmodeTogether,
    ),
    ("ascended hunt h t", TrackedAction::AscendedHuntHardmodeTogether),
    ("ascended hunt t h", TrackedAction::AscendedHuntHardmodeTogether),
    ("hunt", TrackedAction::Hunt),
    ("hunt hardmode", TrackedAction::HuntHardmode),
    ("hunt h", TrackedAction::HuntH),
    ("ascended hunt hardmode", TrackedAction::AscendedHuntHardmode),
    ("ascended hunt h", TrackedAction::AscendedHuntH),
];

/// Recognised epic item phrases (after the `use` keyword).
const EPIC_PHRASES: &[(&str, TrackedAction)] = &[
    ("ultra bait", TrackedAction::UltraBait),
    ("epic seed", TrackedAction::EpicSeed),
    ("coin trumpet", TrackedAction::CoinTrumpet),
];

impl TrackedAction {
    pub const ALL: [TrackedAction; 11] = [
        Self::HuntTogether,
        Self::HuntHardmodeTogether,
        Self::AscendedHuntHardmodeTogether,
        Self::Hunt,
        Self::HuntHardmode,
        Self::HuntH,
        Self::AscendedHuntHardmode,
        Self::AscendedHuntH,
        Self::UltraBait,
        Self::EpicSeed,
        Self::CoinTrumpet,
    ];

    /// Persisted code. Never renumber an existing action.
    pub fn code(self) -> u16 {
        match self {
            Self::HuntTogether => 1,
            Self::HuntHardmodeTogether => 2,
            Self::AscendedHuntHardmodeTogether => 3,
            Self::Hunt => 10,
            Self::HuntHardmode => 11,
            Self::HuntH => 12,
            Self::AscendedHuntHardmode => 13,
            Self::AscendedHuntH => 14,
            Self::UltraBait => 101,
            Self::EpicSeed => 102,
            Self::CoinTrumpet => 103,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.code() == code)
    }

    pub fn class(self) -> ActionClass {
        match self {
            Self::HuntTogether | Self::HuntHardmodeTogether | Self::AscendedHuntHardmodeTogether => {
                ActionClass::Joint
            }
            Self::Hunt
            | Self::HuntHardmode
            | Self::HuntH
            | Self::AscendedHuntHardmode
            | Self::AscendedHuntH => ActionClass::Individual,
            Self::UltraBait | Self::EpicSeed | Self::CoinTrumpet => ActionClass::Epic,
        }
    }

    /// Canonical phrase used when displaying counts.
    pub fn label(self) -> &'static str {
        match self {
            Self::HuntTogether => "hunt together",
            Self::HuntHardmodeTogether => "hunt hardmode together",
            Self::AscendedHuntHardmodeTogether => "ascended hunt hardmode together",
            Self::Hunt => "hunt",
            Self::HuntHardmode => "hunt hardmode",
            Self::HuntH => "hunt h",
            Self::AscendedHuntHardmode => "ascended hunt hardmode",
            Self::AscendedHuntH => "ascended hunt h",
            Self::UltraBait => "ultra bait",
            Self::EpicSeed => "epic seed",
            Self::CoinTrumpet => "coin trumpet",
        }
    }

    /// Exact text the game bot posts when an epic event starts.
    pub fn epic_confirmation(self) -> Option<&'static str> {
        match self {
            Self::UltraBait => Some("placing the ultra bait..."),
            Self::EpicSeed => Some("planting the epic seed..."),
            Self::CoinTrumpet => Some("summoning the coin rain..."),
            _ => None,
        }
    }

    /// Points awarded for starting an epic event.
    pub fn epic_points(self) -> Option<i64> {
        match self {
            Self::UltraBait => Some(5),
            Self::EpicSeed => Some(3),
            Self::CoinTrumpet => Some(1),
            _ => None,
        }
    }

    /// Looks up a normalised hunt phrase, e.g. `"hunt h t"`.
    pub fn from_hunt_phrase(phrase: &str) -> Option<Self> {
        HUNT_PHRASES
            .iter()
            .find(|(p, _)| *p == phrase)
            .map(|(_, action)| *action)
    }

    /// Looks up a normalised epic item phrase, e.g. `"ultra bait"`.
    pub fn from_epic_phrase(phrase: &str) -> Option<Self> {
        EPIC_PHRASES
            .iter()
            .find(|(p, _)| *p == phrase)
            .map(|(_, action)| *action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that every action round-trips through its persisted code.
    ///
    /// Expected: from_code(code()) yields the same action for all actions
    #[test]
    fn codes_are_unique_and_recoverable() {
        for action in TrackedAction::ALL {
            assert_eq!(TrackedAction::from_code(action.code()), Some(action));
        }
        assert_eq!(TrackedAction::from_code(4), None);
    }

    /// Tests that the documented code ranges agree with the explicit class.
    ///
    /// Expected: joint 1..=9, individual 10..=99, epic 100..=199
    #[test]
    fn code_ranges_match_class() {
        for action in TrackedAction::ALL {
            let code = action.code();
            let expected = match code {
                1..=9 => ActionClass::Joint,
                10..=99 => ActionClass::Individual,
                _ => ActionClass::Epic,
            };
            assert_eq!(action.class(), expected, "code {}", code);
        }
    }

    /// Tests phrase aliasing onto a single action.
    ///
    /// Expected: all four hardmode-together spellings resolve to code 2
    #[test]
    fn hunt_phrases_alias() {
        for phrase in [
            "hunt hardmode together",
            "hunt together hardmode",
            "hunt h t",
            "hunt t h",
        ] {
            assert_eq!(
                TrackedAction::from_hunt_phrase(phrase),
                Some(TrackedAction::HuntHardmodeTogether)
            );
        }
        assert_eq!(TrackedAction::from_hunt_phrase("fish"), None);
    }

    /// Tests that only epic actions carry confirmation text and points.
    ///
    /// Expected: Some for epic actions, None for hunts
    #[test]
    fn epic_metadata() {
        let bait = TrackedAction::from_epic_phrase("ultra bait").unwrap();

        assert_eq!(bait.epic_confirmation(), Some("placing the ultra bait..."));
        assert_eq!(bait.epic_points(), Some(5));
        assert_eq!(TrackedAction::Hunt.epic_confirmation(), None);
        assert_eq!(TrackedAction::Hunt.epic_points(), None);
    }
}
