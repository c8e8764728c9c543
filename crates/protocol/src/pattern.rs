//! Card header patterns.
//!
//! A card header is decorated either with a two-hue gradient or with a small
//! dotted tile. Both are derived deterministically from the card id and its
//! pattern seed, so a card keeps its look across sessions and a reroll of
//! the seed is the only way to change it.
//!
//! Hashes run over UTF-16 code units so that stored seeds produce the same
//! pattern they always did.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::card::{Card, PatternType};

/// Fill used for dither dots when none is given.
pub const DEFAULT_DITHER_FILL: &str = "rgba(255,255,255,0.28)";

/// Characters left alone when a tile is embedded in a data URL.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// djb2 over the UTF-16 code units of `input`.
#[must_use]
pub fn djb2(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(5381u32, |h, unit| h.wrapping_mul(33).wrapping_add(u32::from(unit)))
}

/// 32-bit FNV-1a over the UTF-16 code units of `input`.
#[must_use]
pub fn fnv1a(input: &str) -> u32 {
    input.encode_utf16().fold(2_166_136_261u32, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(16_777_619)
    })
}

/// A diagonal two-hue gradient.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::pattern::Gradient;
///
/// let gradient = Gradient::for_id("t-1", "abc123");
/// assert!(gradient.from_hue < 360 && gradient.to_hue < 360);
/// assert!(gradient.css().starts_with("linear-gradient(135deg"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    /// Hue of the top-left stop, in degrees.
    pub from_hue: u32,
    /// Hue of the bottom-right stop, in degrees.
    pub to_hue: u32,
}

impl Gradient {
    /// Derives the gradient of a card from its id and pattern seed.
    #[must_use]
    pub fn for_id(id: &str, seed: &str) -> Self {
        let hash = djb2(&format!("{id}{seed}"));
        Self {
            from_hue: hash % 360,
            to_hue: (hash >> 8) % 360,
        }
    }

    /// Renders the gradient as a CSS `background-image` value.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "linear-gradient(135deg, hsl({} 70% 60% / .25) 0%, hsl({} 70% 60% / .25) 100%)",
            self.from_hue, self.to_hue
        )
    }

    /// Returns both stops as RGB triples, for surfaces that cannot draw CSS.
    #[must_use]
    pub fn rgb_stops(&self) -> [(u8, u8, u8); 2] {
        [
            hsl_to_rgb(f64::from(self.from_hue), 0.7, 0.6),
            hsl_to_rgb(f64::from(self.to_hue), 0.7, 0.6),
        ]
    }
}

/// A square tile holding a single dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherTile {
    /// Edge length of the tile, `6..=10`.
    pub size: u32,
    /// Dot radius, `1..=3`.
    pub dot: u32,
    /// Offset of the dot from the tile center, `-1..=1`.
    pub jitter: i32,
}

impl DitherTile {
    /// Derives the tile for a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::pattern::DitherTile;
    ///
    /// let tile = DitherTile::for_seed("k3j9x0");
    /// assert!((6..=10).contains(&tile.size));
    /// assert!((1..=3).contains(&tile.dot));
    /// assert_eq!(tile, DitherTile::for_seed("k3j9x0"));
    /// ```
    #[must_use]
    pub fn for_seed(seed: &str) -> Self {
        let h = fnv1a(seed);
        Self {
            size: 6 + h % 5,
            dot: 1 + (h >> 3) % 3,
            jitter: ((h >> 7) % 3) as i32 - 1,
        }
    }

    /// Horizontal position of the dot.
    #[must_use]
    pub fn cx(&self) -> f64 {
        (f64::from(self.size) / 2.0 + f64::from(self.jitter)).max(1.0)
    }

    /// Vertical position of the dot.
    #[must_use]
    pub fn cy(&self) -> f64 {
        (f64::from(self.size) / 2.0 - f64::from(self.jitter)).max(1.0)
    }

    /// Renders the tile as a standalone SVG document.
    #[must_use]
    pub fn svg(&self, fill: &str) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}"><rect width="100%" height="100%" fill="none"/><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/></svg>"#,
            size = self.size,
            cx = self.cx(),
            cy = self.cy(),
            r = self.dot,
        )
    }

    /// Renders the tile as a CSS `url(...)` holding an SVG data URL.
    #[must_use]
    pub fn css(&self, fill: &str) -> String {
        let svg = self.svg(fill);
        let encoded = utf8_percent_encode(&svg, URI_COMPONENT);
        format!(r#"url("data:image/svg+xml;utf8,{encoded}")"#)
    }
}

/// The header pattern of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPattern {
    /// Two-hue gradient.
    Gradient(Gradient),
    /// Dotted tile.
    Dither(DitherTile),
}

impl CardPattern {
    /// Picks the pattern a card asks for.
    ///
    /// A dither tile falls back to the card id when the card has no seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::pattern::CardPattern;
    /// use orcganizer_protocol::{Card, CardDraft, PatternType};
    ///
    /// let mut card = Card::from_draft("t-1", "seed01", CardDraft::default());
    /// assert!(matches!(CardPattern::for_card(&card), CardPattern::Gradient(_)));
    ///
    /// card.pattern_type = PatternType::Dither;
    /// assert!(matches!(CardPattern::for_card(&card), CardPattern::Dither(_)));
    /// ```
    #[must_use]
    pub fn for_card(card: &Card) -> Self {
        match card.pattern_type {
            PatternType::Default => Self::Gradient(Gradient::for_id(&card.id, &card.pattern_seed)),
            PatternType::Dither => {
                let seed = if card.pattern_seed.is_empty() {
                    &card.id
                } else {
                    &card.pattern_seed
                };
                Self::Dither(DitherTile::for_seed(seed))
            }
        }
    }

    /// Renders the pattern as a CSS `background-image` value.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Gradient(gradient) => gradient.css(),
            Self::Dither(tile) => tile.css(DEFAULT_DITHER_FILL),
        }
    }
}

/// Converts an HSL color to RGB.
///
/// `hue` is in degrees and wraps; `saturation` and `lightness` are in `0..=1`.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::pattern::hsl_to_rgb;
///
/// assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
/// assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
/// assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
/// ```
#[must_use]
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - chroma / 2.0;
    let (r, g, b) = match hue {
        h if h < 60.0 => (chroma, x, 0.0),
        h if h < 120.0 => (x, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, x),
        h if h < 240.0 => (0.0, x, chroma),
        h if h < 300.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}
