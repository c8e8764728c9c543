//! Quest card types.
//!
//! This module defines the card itself along with the small value types that
//! describe it: priority, quest kind, icon and header pattern. It also holds
//! the two "input" shapes used by the store: [`CardDraft`] for creation and
//! [`CardPatch`] for partial updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Identifier of a card, unique within its column.
pub type CardId = String;

/// Card priority, always within `0..=5`.
///
/// The only way to build a `Priority` from an arbitrary number is through
/// [`Priority::clamped`], so an out-of-range value can never be stored.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::Priority;
///
/// assert_eq!(Priority::clamped(3).value(), 3);
/// assert_eq!(Priority::clamped(42).value(), 5);
/// assert_eq!(Priority::clamped(-1).value(), 0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// The highest priority a card can have.
    pub const MAX: u8 = 5;

    /// Builds a priority, clamping `value` into `0..=5`.
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self(0)
        } else if value > Self::MAX as i64 {
            Self(Self::MAX)
        } else {
            Self(value as u8)
        }
    }

    /// Returns the numeric value of this priority.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Renders the priority as five stars, filled up to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::Priority;
    ///
    /// assert_eq!(Priority::clamped(2).stars(), "★★☆☆☆");
    /// ```
    #[must_use]
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a card is a main quest or a side quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// A main quest.
    Main,
    /// A side quest.
    #[default]
    Sub,
}

impl TaskType {
    /// Returns the serialized name of the quest kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sub => "sub",
        }
    }

    /// Returns the label shown on a card.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::TaskType;
    ///
    /// assert_eq!(TaskType::Main.label(), "Main quest");
    /// assert_eq!(TaskType::Sub.label(), "Sub quest");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Main => "Main quest",
            Self::Sub => "Sub quest",
        }
    }

    /// Returns the other quest kind.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Main => Self::Sub,
            Self::Sub => Self::Main,
        }
    }

    /// Parses a quest kind, treating anything but `"main"` as a side quest.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        if value == "main" { Self::Main } else { Self::Sub }
    }
}

impl FromStr for TaskType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Self::Main),
            "sub" => Ok(Self::Sub),
            other => Err(ProtocolError::UnknownTaskType(other.to_string())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The icon shown in a card header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    /// A sword (the default).
    #[default]
    Sword,
    /// A shield.
    Shield,
    /// A scroll.
    Scroll,
    /// A potion.
    Potion,
    /// A star.
    Star,
    /// A treasure chest.
    Chest,
    /// A map.
    Map,
}

impl Icon {
    /// All icons in picker order.
    pub const ALL: [Self; 7] = [
        Self::Sword,
        Self::Shield,
        Self::Scroll,
        Self::Potion,
        Self::Star,
        Self::Chest,
        Self::Map,
    ];

    /// Returns the serialized name of the icon.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sword => "sword",
            Self::Shield => "shield",
            Self::Scroll => "scroll",
            Self::Potion => "potion",
            Self::Star => "star",
            Self::Chest => "chest",
            Self::Map => "map",
        }
    }

    /// Returns the emoji glyph for the icon.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Sword => "🗡️",
            Self::Shield => "🛡️",
            Self::Scroll => "📜",
            Self::Potion => "🧪",
            Self::Star => "⭐",
            Self::Chest => "🧰",
            Self::Map => "🗺️",
        }
    }

    /// Returns the next icon in picker order, wrapping around.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::Icon;
    ///
    /// assert_eq!(Icon::Sword.next(), Icon::Shield);
    /// assert_eq!(Icon::Map.next(), Icon::Sword);
    /// ```
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Parses an icon name, falling back to [`Icon::Sword`] for unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::Icon;
    ///
    /// assert_eq!(Icon::parse_lenient("potion"), Icon::Potion);
    /// assert_eq!(Icon::parse_lenient("🦄"), Icon::Sword);
    /// ```
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Icon {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownIcon(s.to_string()))
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the card header pattern is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// A two-hue gradient derived from the card id and seed.
    #[default]
    Default,
    /// A dotted SVG tile derived from the seed.
    Dither,
}

impl PatternType {
    /// Returns the serialized name of the pattern type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dither => "dither",
        }
    }

    /// Returns the other pattern type.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Default => Self::Dither,
            Self::Dither => Self::Default,
        }
    }
}

impl FromStr for PatternType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "dither" => Ok(Self::Dither),
            other => Err(ProtocolError::UnknownPatternType(other.to_string())),
        }
    }
}

/// A task card on a column.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::{Card, CardDraft, Icon, TaskType};
///
/// let card = Card::from_draft("t-1", "a1b2c3", CardDraft::titled("Slay the bug"));
/// assert_eq!(card.title, "Slay the bug");
/// assert_eq!(card.task_type, TaskType::Sub);
/// assert_eq!(card.icon, Icon::Sword);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Identifier, unique within the owning column.
    pub id: CardId,
    /// Short summary of the quest.
    pub title: String,
    /// Free-form notes.
    pub notes: String,
    /// Priority in `0..=5`.
    pub priority: Priority,
    /// Main or side quest.
    pub task_type: TaskType,
    /// Header icon.
    pub icon: Icon,
    /// Seed for the header pattern. Purely visual.
    pub pattern_seed: String,
    /// How the header pattern is drawn.
    #[serde(default)]
    pub pattern_type: PatternType,
    /// Whether the card is collapsed to its title.
    #[serde(default)]
    pub minimized: bool,
}

impl Card {
    /// Builds a card from a draft with the given id and pattern seed.
    #[must_use]
    pub fn from_draft(
        id: impl Into<CardId>,
        pattern_seed: impl Into<String>,
        draft: CardDraft,
    ) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            notes: draft.notes,
            priority: draft.priority,
            task_type: draft.task_type,
            icon: draft.icon,
            pattern_seed: pattern_seed.into(),
            pattern_type: draft.pattern_type,
            minimized: false,
        }
    }

    /// Returns a copy of this card with `patch` merged onto it.
    #[must_use]
    pub fn patched(&self, patch: &CardPatch) -> Self {
        let mut card = self.clone();
        patch.apply(&mut card);
        card
    }
}

/// The user-supplied fields of a card that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    /// Title of the new card.
    pub title: String,
    /// Notes of the new card.
    pub notes: String,
    /// Priority of the new card.
    pub priority: Priority,
    /// Quest kind of the new card.
    pub task_type: TaskType,
    /// Icon of the new card.
    pub icon: Icon,
    /// Pattern type of the new card.
    pub pattern_type: PatternType,
}

impl Default for CardDraft {
    fn default() -> Self {
        Self {
            title: "New task".to_string(),
            notes: String::new(),
            priority: Priority::default(),
            task_type: TaskType::default(),
            icon: Icon::default(),
            pattern_type: PatternType::default(),
        }
    }
}

impl CardDraft {
    /// Creates a draft with the given title and default fields.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A partial update of a card.
///
/// Fields left as `None` are not touched when the patch is applied, so two
/// patches naming different fields never overwrite each other.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::{Card, CardDraft, CardPatch};
///
/// let card = Card::from_draft("t-1", "seed", CardDraft::titled("Old"));
/// let card = card.patched(&CardPatch::new().title("New"));
/// let card = card.patched(&CardPatch::new().notes("Bring potions"));
///
/// assert_eq!(card.title, "New");
/// assert_eq!(card.notes, "Bring potions");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    /// New title.
    pub title: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New quest kind.
    pub task_type: Option<TaskType>,
    /// New icon.
    pub icon: Option<Icon>,
    /// New pattern seed.
    pub pattern_seed: Option<String>,
    /// New pattern type.
    pub pattern_type: Option<PatternType>,
    /// New minimized flag.
    pub minimized: Option<bool>,
}

impl CardPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the priority, clamping it into range.
    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(Priority::clamped(priority));
        self
    }

    /// Sets the quest kind.
    #[must_use]
    pub fn task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Sets the icon.
    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the pattern seed.
    #[must_use]
    pub fn pattern_seed(mut self, seed: impl Into<String>) -> Self {
        self.pattern_seed = Some(seed.into());
        self
    }

    /// Sets the pattern type.
    #[must_use]
    pub fn pattern_type(mut self, pattern_type: PatternType) -> Self {
        self.pattern_type = Some(pattern_type);
        self
    }

    /// Sets the minimized flag.
    #[must_use]
    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = Some(minimized);
        self
    }

    /// Returns `true` if the patch names no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the named fields onto `card`.
    pub fn apply(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title.clone_from(title);
        }
        if let Some(notes) = &self.notes {
            card.notes.clone_from(notes);
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if let Some(task_type) = self.task_type {
            card.task_type = task_type;
        }
        if let Some(icon) = self.icon {
            card.icon = icon;
        }
        if let Some(seed) = &self.pattern_seed {
            card.pattern_seed.clone_from(seed);
        }
        if let Some(pattern_type) = self.pattern_type {
            card.pattern_type = pattern_type;
        }
        if let Some(minimized) = self.minimized {
            card.minimized = minimized;
        }
    }
}
