//! Style identity and the default parameter preset.
//!
//! The registry declares which modifiers and colours the style understands.
//! Callers start from [`StyleMetadata::options`] / [`StyleMetadata::colors`]
//! and override values; the registry itself is never mutated.

use crate::color::Color;
use crate::error::StyleError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

/// Cell density modifier.
pub const DENSITY: &str = "mod1";
/// Palette phase modifier.
pub const HUE: &str = "mod2";
/// Colour painted behind the generator.
pub const BACKGROUND: &str = "background";

pub const MAX_MODIFIERS: usize = 4;
pub const MAX_COLORS: usize = 3;

/// A named scalar in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub name: String,
    pub value: f64,
}

/// Ordered set of 1 to 4 modifiers.
///
/// Values are kept as supplied; [`ModifierSet::get`] clamps on read so slider
/// overshoot never reaches the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSet {
    entries: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new<N: Into<String>>(
        entries: impl IntoIterator<Item = (N, f64)>,
    ) -> Result<Self, StyleError> {
        let entries: Vec<Modifier> = entries
            .into_iter()
            .map(|(name, value)| Modifier {
                name: name.into(),
                value,
            })
            .collect();
        validate_names(entries.iter().map(|m| m.name.as_str()), MAX_MODIFIERS, "modifier")?;
        Ok(Self { entries })
    }

    /// Clamped value of `name`, or `None` if the set does not declare it.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.raw(name).map(clamp_unit)
    }

    /// Value of `name` exactly as supplied.
    pub fn raw(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|m| m.name == name).map(|m| m.value)
    }

    /// Override an existing modifier. Unknown names are rejected.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), StyleError> {
        match self.entries.iter_mut().find(|m| m.name == name) {
            Some(entry) => {
                entry.value = value;
                Ok(())
            }
            None => Err(StyleError::UnknownParameter(name.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ModifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for m in &self.entries {
            map.serialize_entry(&m.name, &m.value)?;
        }
        map.end()
    }
}

/// Ordered set of 1 to 3 named colours, always including `background`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSet {
    entries: Vec<(String, Color)>,
}

impl ColorSet {
    pub fn new<N: Into<String>>(
        entries: impl IntoIterator<Item = (N, Color)>,
    ) -> Result<Self, StyleError> {
        let entries: Vec<(String, Color)> =
            entries.into_iter().map(|(n, c)| (n.into(), c)).collect();
        validate_names(entries.iter().map(|(n, _)| n.as_str()), MAX_COLORS, "color")?;
        if !entries.iter().any(|(n, _)| n == BACKGROUND) {
            return Err(StyleError::InvalidSchema(format!(
                "color set must declare `{BACKGROUND}`"
            )));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    pub fn background(&self) -> Color {
        self.get(BACKGROUND).unwrap_or(Color::BLACK)
    }

    pub fn set(&mut self, name: &str, color: Color) -> Result<(), StyleError> {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => {
                entry.1 = color;
                Ok(())
            }
            None => Err(StyleError::UnknownParameter(name.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }
}

impl Serialize for ColorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, color) in &self.entries {
            map.serialize_entry(name, color)?;
        }
        map.end()
    }
}

/// Style identity plus its preset.
#[derive(Debug, Clone, Serialize)]
pub struct StyleMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub creator_name: &'static str,
    pub options: ModifierSet,
    pub colors: ColorSet,
}

/// The registry entry for this style, built once.
pub fn style_metadata() -> &'static StyleMetadata {
    static METADATA: OnceLock<StyleMetadata> = OnceLock::new();
    METADATA.get_or_init(|| StyleMetadata {
        name: "Block Cells",
        description: "A discretised tiling whose cell grid and palette are \
                      seeded by the block hash.",
        image: "",
        creator_name: "blockart",
        options: ModifierSet {
            entries: vec![
                Modifier {
                    name: DENSITY.to_string(),
                    value: 0.5,
                },
                Modifier {
                    name: HUE.to_string(),
                    value: 0.5,
                },
            ],
        },
        colors: ColorSet {
            entries: vec![(
                BACKGROUND.to_string(),
                Color::rgb(11.0 / 255.0, 11.0 / 255.0, 16.0 / 255.0),
            )],
        },
    })
}

/// Clamp to [0, 1]; NaN reads as 0.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn validate_names<'a>(
    names: impl Iterator<Item = &'a str>,
    max: usize,
    kind: &str,
) -> Result<(), StyleError> {
    let names: Vec<&str> = names.collect();
    if names.is_empty() || names.len() > max {
        return Err(StyleError::InvalidSchema(format!(
            "expected 1 to {max} {kind}s, got {}",
            names.len()
        )));
    }
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(StyleError::InvalidSchema(format!("{kind} names must not be empty")));
        }
        if names[..i].contains(name) {
            return Err(StyleError::InvalidSchema(format!("duplicate {kind} `{name}`")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preset_declares_two_modifiers_and_a_background() {
        let style = style_metadata();
        assert_eq!(style.options.get(DENSITY), Some(0.5));
        assert_eq!(style.options.get(HUE), Some(0.5));
        assert_eq!(style.colors.background().to_hex(), "#0b0b10");
        assert!(!style.name.is_empty());

        let names: Vec<&str> = style.options.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec![DENSITY, HUE]);
        assert_eq!(style.options.len(), 2);
        assert_eq!(style.colors.iter().count(), 1);
    }

    #[test]
    fn registry_is_a_single_instance() {
        assert!(std::ptr::eq(style_metadata(), style_metadata()));
    }

    #[test]
    fn modifier_cardinality_is_enforced() {
        assert!(ModifierSet::new(Vec::<(&str, f64)>::new()).is_err());
        let five = (1..=5).map(|i| (format!("mod{i}"), 0.5));
        assert!(matches!(
            ModifierSet::new(five),
            Err(StyleError::InvalidSchema(_))
        ));
        assert!(ModifierSet::new([("a", 0.1), ("b", 0.2), ("c", 0.3), ("d", 0.4)]).is_ok());
    }

    #[test]
    fn duplicate_and_blank_names_are_rejected() {
        assert!(ModifierSet::new([("mod1", 0.1), ("mod1", 0.2)]).is_err());
        assert!(ModifierSet::new([(" ", 0.1)]).is_err());
    }

    #[test]
    fn reads_are_clamped_but_raw_values_are_kept() {
        let mut mods = style_metadata().options.clone();
        mods.set(DENSITY, 1.5).unwrap();
        mods.set(HUE, -0.5).unwrap();
        assert_eq!(mods.get(DENSITY), Some(1.0));
        assert_eq!(mods.get(HUE), Some(0.0));
        assert_eq!(mods.raw(DENSITY), Some(1.5));

        mods.set(HUE, f64::NAN).unwrap();
        assert_eq!(mods.get(HUE), Some(0.0));
    }

    #[test]
    fn overriding_unknown_names_fails() {
        let mut mods = style_metadata().options.clone();
        assert_eq!(
            mods.set("mod9", 0.1),
            Err(StyleError::UnknownParameter("mod9".into()))
        );
        let mut colors = style_metadata().colors.clone();
        assert!(colors.set("accent", Color::BLACK).is_err());
    }

    #[test]
    fn color_set_requires_background() {
        assert!(ColorSet::new([("accent", Color::BLACK)]).is_err());
        let four = ["background", "a", "b", "c"].map(|n| (n, Color::BLACK));
        assert!(ColorSet::new(four).is_err());
        assert!(ColorSet::new([(BACKGROUND, Color::BLACK), ("ink", Color::BLACK)]).is_ok());
    }

    #[test]
    fn metadata_serializes_with_ordered_options() {
        let json = serde_json::to_value(style_metadata()).unwrap();
        assert_eq!(json["options"], serde_json::json!({"mod1": 0.5, "mod2": 0.5}));
        assert_eq!(json["colors"]["background"], "#0b0b10");
    }
}
