use serde::Serialize;

/// A named preset of framing parameters for a social platform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub padding: u32,
    pub border_radius: u32,
    pub shadow_intensity: u32,
    /// Width / height; `None` keeps the source ratio.
    pub aspect_ratio: Option<f64>,
    pub shadow_inset: bool,
}

pub const TEMPLATES: [Template; 6] = [
    Template {
        name: "LinkedIn",
        padding: 40,
        border_radius: 8,
        shadow_intensity: 15,
        aspect_ratio: Some(16.0 / 9.0),
        shadow_inset: false,
    },
    Template {
        name: "Instagram",
        padding: 24,
        border_radius: 16,
        shadow_intensity: 12,
        aspect_ratio: Some(1.0),
        shadow_inset: false,
    },
    Template {
        name: "Twitter/X",
        padding: 32,
        border_radius: 12,
        shadow_intensity: 18,
        aspect_ratio: Some(16.0 / 9.0),
        shadow_inset: false,
    },
    Template {
        name: "Facebook",
        padding: 20,
        border_radius: 8,
        shadow_intensity: 10,
        aspect_ratio: Some(16.0 / 9.0),
        shadow_inset: false,
    },
    Template {
        name: "Pinterest",
        padding: 16,
        border_radius: 20,
        shadow_intensity: 8,
        aspect_ratio: Some(2.0 / 3.0),
        shadow_inset: false,
    },
    Template {
        name: "Reddit",
        padding: 24,
        border_radius: 8,
        shadow_intensity: 20,
        aspect_ratio: Some(4.0 / 3.0),
        shadow_inset: true,
    },
];

impl Template {
    /// Every built-in template, in display order.
    pub fn all() -> &'static [Template] {
        &TEMPLATES
    }

    /// Case-insensitive lookup; `"twitter"` and `"x"` both find `Twitter/X`.
    pub fn find(name: &str) -> Option<&'static Template> {
        let name = name.trim();
        TEMPLATES.iter().find(|t| {
            t.name.eq_ignore_ascii_case(name)
                || t.name.split('/').any(|part| part.eq_ignore_ascii_case(name))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/catalog.rs"]
mod tests;
