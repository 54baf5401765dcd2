use serde::{Deserialize, Serialize};

use crate::assets::color::Color;

/// Version of the `"c1,c2"` swatch value encoding accepted by [`Swatch::parse`].
///
/// Version 1 carries at most two stops. Adding more stops changes the split rule and needs a new
/// version.
pub const SWATCH_ENCODING_VERSION: u32 = 1;

/// Colors carried by a background swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    /// No paint at all.
    Transparent,
    /// One color.
    Solid(Color),
    /// Two gradient stops, left to right.
    Gradient(Color, Color),
}

impl Swatch {
    /// Parse the encoded swatch value used by catalogs and session files.
    ///
    /// `"c1,c2"` splits on the first comma into two stops; a single value is a solid color;
    /// `"transparent"` is no paint. Anything unparseable (including a third stop) resolves to
    /// [`Swatch::Transparent`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.split_once(',') {
            Some((first, second)) => {
                if second.contains(',') {
                    tracing::debug!(value, "swatch carries more than two stops");
                    return Self::Transparent;
                }
                match (Color::parse_css(first), Color::parse_css(second)) {
                    (Ok(a), Ok(b)) => Self::Gradient(a, b),
                    _ => Self::Transparent,
                }
            }
            None => match Color::parse_css(value) {
                Ok(c) if c.is_transparent() => Self::Transparent,
                Ok(c) => Self::Solid(c),
                Err(_) => Self::Transparent,
            },
        }
    }

    /// Encoded value, the inverse of [`Swatch::parse`].
    pub fn encode(&self) -> String {
        match self {
            Self::Transparent => "transparent".to_owned(),
            Self::Solid(c) => c.to_string(),
            Self::Gradient(a, b) => format!("{a},{b}"),
        }
    }

    /// First color; transparent for [`Swatch::Transparent`].
    pub fn primary(&self) -> Color {
        match self {
            Self::Transparent => Color::TRANSPARENT,
            Self::Solid(c) | Self::Gradient(c, _) => *c,
        }
    }

    /// Second gradient stop, if any.
    pub fn secondary(&self) -> Option<Color> {
        match self {
            Self::Gradient(_, c) => Some(*c),
            _ => None,
        }
    }

    /// Return `true` for the "None" swatch.
    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl Serialize for Swatch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Swatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// A swatch with its display name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSwatch {
    /// Display name.
    pub name: String,
    /// Colors.
    pub swatch: Swatch,
}

const BUILTIN: &[(&str, &str)] = &[
    ("Beach", "#00d2ff,#3a7bd5"),
    ("Cool", "#accbee,#e7f0fd"),
    ("Violet", "#7028e4,#e5b2ca"),
    ("Rose", "#ee9ca7,#ffdde1"),
    ("Love", "#ff758c,#ff7eb3"),
    ("Flower", "#a18cd1,#fbc2eb"),
    ("Sky", "#89f7fe,#66a6ff"),
    ("Sunset", "#f97316,#d946ef"),
    ("Ocean", "#0ea5e9,#6366f1"),
    ("Forest", "#22c55e,#14b8a6"),
    ("Candy", "#f472b6,#9333ea"),
    ("White", "#ffffff"),
    ("Black", "#000000"),
    ("None", "transparent"),
];

/// Built-in swatches followed by user-created gradients.
#[derive(Debug, Clone)]
pub struct SwatchCatalog {
    entries: Vec<NamedSwatch>,
    custom_count: usize,
}

impl Default for SwatchCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SwatchCatalog {
    /// The built-in swatch list.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, value)| NamedSwatch {
                name: (*name).to_owned(),
                swatch: Swatch::parse(value),
            })
            .collect();
        Self {
            entries,
            custom_count: 0,
        }
    }

    /// All swatches in display order.
    pub fn entries(&self) -> &[NamedSwatch] {
        &self.entries
    }

    /// Look up a swatch by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&NamedSwatch> {
        self.entries
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Append a custom two-stop gradient named `Custom N`.
    pub fn add_custom_gradient(&mut self, from: Color, to: Color) -> &NamedSwatch {
        self.custom_count += 1;
        self.entries.push(NamedSwatch {
            name: format!("Custom {}", self.custom_count),
            swatch: Swatch::Gradient(from, to),
        });
        let idx = self.entries.len() - 1;
        &self.entries[idx]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/swatch.rs"]
mod tests;
