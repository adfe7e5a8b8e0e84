//! Centralized navigation/projection options with TOML preset support.
//!
//! All tweakable settings (orbit bounds, sensitivity, smoothing,
//! projection parameters, keybindings) are consolidated here. Options
//! serialize to/from TOML for presets stored in `assets/presets/`.

mod keybindings;
mod navigation;
mod projection;

use std::path::Path;

pub use keybindings::KeybindingOptions;
pub use navigation::NavigationOptions;
pub use projection::ProjectionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VantageError;
use crate::navigation::Constraints;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[projection]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Orbit bounds, sensitivity and smoothing.
    pub navigation: NavigationOptions,
    /// Camera projection parameters.
    pub projection: ProjectionOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Check every section; the first problem found is returned.
    pub fn validate(&self) -> Result<(), VantageError> {
        self.navigation.validate()?;
        let _ = Constraints::new(&self.navigation)?;
        self.projection.validate()?;
        self.keybindings.validate()
    }

    /// Load and validate options from a TOML file. Missing fields use
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path).map_err(VantageError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        options.validate()?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VantageError::Io)?;
        }
        std::fs::write(path, content).map_err(VantageError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{ProjectionCount, ProjectionMode};
    use crate::command::ViewAction;
    use crate::navigation::Bounds;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[projection]
fov_degrees = 35.0
initial_mode = "orthographic"

[navigation]
radius_range = { min = 2.0, max = 40.0 }
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.projection.fov_degrees, 35.0);
        assert_eq!(opts.projection.initial_mode, ProjectionMode::Orthographic);
        assert_eq!(opts.navigation.radius_range, Bounds::new(2.0, 40.0));
        // Everything else should be default
        assert_eq!(opts.projection.ortho_size, 6.5);
        assert_eq!(opts.navigation.azimuth_range, None);
    }

    #[test]
    fn azimuth_range_is_optional_in_toml() {
        let toml_str = r"
[navigation]
azimuth_range = { min = -1.5, max = 1.5 }
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.navigation.azimuth_range, Some(Bounds::new(-1.5, 1.5)));
    }

    #[test]
    fn inverted_range_fails_validation() {
        let mut opts = Options::default();
        opts.navigation.polar_range = Bounds::new(2.0, 1.0);
        assert!(matches!(
            opts.validate(),
            Err(VantageError::InvalidBounds {
                name: "polar_range",
                ..
            })
        ));
    }

    #[test]
    fn orthographic_start_needs_two_projections() {
        let mut opts = Options::default();
        opts.projection.projection_count = ProjectionCount::One;
        opts.projection.initial_mode = ProjectionMode::Orthographic;
        assert!(matches!(
            opts.validate(),
            Err(VantageError::ProjectionUnavailable(
                ProjectionMode::Orthographic
            ))
        ));
    }

    #[test]
    fn degenerate_frustum_rejected() {
        let mut opts = Options::default();
        opts.projection.far = opts.projection.near;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.projection.fov_degrees = 180.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn negative_sensitivity_rejected() {
        let mut opts = Options::default();
        opts.navigation.zoom_sensitivity = -1.0;
        assert!(matches!(
            opts.validate(),
            Err(VantageError::InvalidOption {
                name: "zoom_sensitivity",
                ..
            })
        ));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyP"),
            Some(ViewAction::ToggleProjection)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), Some(ViewAction::ResetView));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybindings_survive_toml() {
        let toml_str = r#"
[keybindings.bindings]
reset_view = "Home"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Home"), Some(ViewAction::ResetView));
        assert_eq!(opts.keybindings.lookup("KeyR"), None);
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut opts = Options::default();
        let _ = opts
            .keybindings
            .bindings
            .insert(ViewAction::ResetView, "KeyP".into());
        assert!(opts.validate().is_err());
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir().join(format!(
            "vantage-options-{}",
            std::process::id()
        ));
        let path = dir.join("wide.toml");
        let mut opts = Options::default();
        opts.projection.fov_degrees = 70.0;
        opts.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["wide".to_owned()]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Options::load(Path::new("/nonexistent/vantage.toml"))
            .unwrap_err();
        assert!(matches!(err, VantageError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("navigation"));
        assert!(props.contains_key("projection"));
        assert!(!props.contains_key("keybindings"));

        let navigation = &props["navigation"]["properties"];
        assert!(navigation.get("drag_sensitivity").is_some());
        assert!(navigation.get("radius_range").is_none());

        let projection = &props["projection"]["properties"];
        assert!(projection.get("fov_degrees").is_some());
        assert!(projection.get("near").is_none());
    }

    #[test]
    fn bundled_presets_are_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets");
        let mut names = Options::list_presets(&dir);
        names.sort();
        assert_eq!(names, vec!["drafting".to_owned(), "turntable".to_owned()]);

        let drafting = Options::load(&dir.join("drafting.toml")).unwrap();
        assert_eq!(
            drafting.projection.initial_mode,
            ProjectionMode::Orthographic
        );
        let turntable = Options::load(&dir.join("turntable.toml")).unwrap();
        assert_eq!(turntable.navigation.target_range.x.max, 0.0);
    }
}
