//! Host property bridge.
//!
//! Hosts push settings as a JSON object of `{ "<key>": { "value": <v> } }`
//! entries, any subset at a time. [`HostProperties::apply`] folds such a
//! batch into a fresh [`Settings`] snapshot and reports which parts of the
//! display need work.

use crate::config::{normalize_image_uri, ArtColorMode, Settings};
use crate::error::ConfigError;
use serde_json::Value;
use textscope_core::{parse_unit_triplet, PaletteSlot, PaletteTheme};

/// Which consumers a property batch affects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    /// The ASCII art must be re-rendered.
    pub art: bool,
    /// The palette must be rebuilt.
    pub palette: bool,
    /// Layout and overflow checks must be redone.
    pub layout: bool,
}

impl Changes {
    /// Whether nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.art && !self.palette && !self.layout
    }
}

/// Result of applying a property batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpdate {
    /// The new snapshot.
    pub settings: Settings,
    /// What changed.
    pub changes: Changes,
}

/// Stateless translator from host property batches to settings snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProperties;

impl HostProperties {
    /// Parse a JSON payload and apply it.
    pub fn apply_json(current: &Settings, payload: &str) -> Result<PropertyUpdate, ConfigError> {
        let value: Value = serde_json::from_str(payload)?;
        Ok(Self::apply(current, &value))
    }

    /// Apply a property batch on top of `current`.
    ///
    /// Unknown keys and values of the wrong type are ignored.
    #[must_use]
    pub fn apply(current: &Settings, properties: &Value) -> PropertyUpdate {
        let mut settings = current.clone();
        let mut changes = Changes::default();
        let Some(props) = properties.as_object() else {
            tracing::debug!("property payload is not an object");
            return PropertyUpdate { settings, changes };
        };

        let mut overrides_touched = false;
        for slot in PaletteSlot::ALL {
            let Some(text) = property(props, slot.name()).and_then(Value::as_str) else {
                continue;
            };
            match parse_unit_triplet(text) {
                Some(channels) => {
                    settings.palette.overrides.insert(slot, channels);
                    overrides_touched = true;
                }
                None => tracing::debug!(slot = slot.name(), text, "unparseable slot color"),
            }
        }
        if overrides_touched {
            changes.palette = true;
            changes.art = true;
        }

        if let Some(name) = property(props, "theme").and_then(Value::as_str) {
            if PaletteTheme::from_name(name).is_none() {
                tracing::warn!(theme = name, "unknown theme, using default");
            }
            settings.palette.theme = name.to_string();
            changes.palette = true;
            changes.art = true;
        }

        let art = &mut settings.art;
        if let Some(flag) = property(props, "usemediaart").and_then(Value::as_bool) {
            art.use_media_art = flag;
            changes.art = true;
        }
        if let Some(path) = property(props, "defaultimage").and_then(Value::as_str) {
            let path = path.trim();
            art.default_image = (!path.is_empty()).then(|| normalize_image_uri(path));
            changes.art = true;
        }
        if let Some(flag) = property(props, "coloredascii").and_then(Value::as_bool) {
            art.colored = flag;
            changes.art = true;
        }
        if let Some(slider) = property(props, "asciiresolution").and_then(as_number) {
            if slider.is_finite() {
                // Slider values start two above the sample count.
                art.resolution = (slider.trunc() - 2.0).max(0.0) as u32;
                changes.art = true;
            }
        }
        if let Some(saturation) = property(props, "saturation").and_then(as_number) {
            art.saturation = saturation as f32;
            changes.art = true;
        }
        if let Some(mode) = property(props, "ascii_color_mode").and_then(Value::as_str) {
            match ArtColorMode::from_name(mode) {
                Some(mode) => {
                    art.color_mode = mode;
                    changes.art = true;
                }
                None => tracing::debug!(mode, "unknown art color mode"),
            }
        }

        if let Some(size) = property(props, "textsize").and_then(as_number) {
            settings.text_size_pt = (size.is_finite() && size > 0.0).then_some(size as f32);
            changes.layout = true;
        }
        if let Some(flag) = property(props, "hideitoobigiwarning").and_then(Value::as_bool) {
            settings.ignore_too_big = flag;
            changes.layout = true;
        }

        PropertyUpdate {
            settings: settings.sanitized(),
            changes,
        }
    }
}

/// The `value` of a property entry; bare values are accepted too.
fn property<'a>(props: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    let entry = props.get(key)?;
    match entry {
        Value::Object(obj) => obj.get("value"),
        other => Some(other),
    }
}

/// A number, or a string holding one.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use textscope_core::Rgb;

    #[test]
    fn test_empty_batch_changes_nothing() {
        let current = Settings::default();
        let update = HostProperties::apply(&current, &json!({}));
        assert!(update.changes.is_empty());
        assert_eq!(update.settings, current);
    }

    #[test]
    fn test_non_object_payload_ignored() {
        let update = HostProperties::apply(&Settings::default(), &json!([1, 2]));
        assert!(update.changes.is_empty());
    }

    #[test]
    fn test_slot_colors() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({ "bright-red": { "value": "1 0.5 0" } }),
        );
        assert!(update.changes.palette);
        assert!(update.changes.art);
        assert_eq!(
            update.settings.palette.override_colors(),
            vec![(PaletteSlot::BrightRed, Rgb::new(255, 128, 0))]
        );
    }

    #[test]
    fn test_bad_slot_color_ignored() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({ "red": { "value": "not a color" } }),
        );
        assert!(update.changes.is_empty());
    }

    #[test]
    fn test_theme() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({ "theme": { "value": "dracula" } }),
        );
        assert!(update.changes.palette);
        assert_eq!(update.settings.palette.theme(), PaletteTheme::Dracula);
    }

    #[test]
    fn test_resolution_offset() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({ "asciiresolution": { "value": 66 } }),
        );
        assert!(update.changes.art);
        assert!(!update.changes.palette);
        assert_eq!(update.settings.art.resolution, 64);
    }

    #[test]
    fn test_resolution_clamped() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({ "asciiresolution": { "value": "1" } }),
        );
        assert_eq!(update.settings.art.resolution, 2);
    }

    #[test]
    fn test_art_batch() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({
                "saturation": { "value": 0.0 },
                "coloredascii": { "value": false },
                "ascii_color_mode": { "value": "image" },
                "usemediaart": { "value": false },
                "defaultimage": { "value": "D:\\art\\cover.jpg" },
            }),
        );
        let art = &update.settings.art;
        assert!(update.changes.art);
        assert_eq!(art.saturation, 0.0);
        assert!(!art.colored);
        assert_eq!(art.color_mode, ArtColorMode::Direct);
        assert!(!art.use_media_art);
        assert_eq!(art.default_image.as_deref(), Some("file:///D:/art/cover.jpg"));
    }

    #[test]
    fn test_negative_saturation_clamped() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({ "saturation": { "value": -2 } }),
        );
        assert_eq!(update.settings.art.saturation, 0.0);
    }

    #[test]
    fn test_layout_keys() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({
                "textsize": { "value": 14 },
                "hideitoobigiwarning": { "value": true },
            }),
        );
        assert!(update.changes.layout);
        assert!(!update.changes.art);
        assert_eq!(update.settings.text_size_pt, Some(14.0));
        assert!(update.settings.ignore_too_big);
    }

    #[test]
    fn test_wrong_types_ignored() {
        let update = HostProperties::apply(
            &Settings::default(),
            &json!({
                "coloredascii": { "value": "yes" },
                "unknownkey": { "value": 1 },
            }),
        );
        assert!(update.changes.is_empty());
    }

    #[test]
    fn test_does_not_mutate_current() {
        let current = Settings::default();
        let _ = HostProperties::apply(&current, &json!({ "saturation": { "value": 3 } }));
        assert_eq!(current.art.saturation, 1.0);
    }

    #[test]
    fn test_apply_json() {
        let update =
            HostProperties::apply_json(&Settings::default(), r#"{"saturation":{"value":2}}"#)
                .unwrap();
        assert_eq!(update.settings.art.saturation, 2.0);
        assert!(HostProperties::apply_json(&Settings::default(), "{").is_err());
    }
}
