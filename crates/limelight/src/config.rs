//
// config.rs
//
// Spotlight configuration
//

use serde_json::Value;

use crate::host::StyleSpec;

/// User-facing configuration for the spotlight feature.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightConfig {
    /// Whether the feature is active. The host persists this flag.
    pub enabled: bool,
    /// Opacity applied to dimmed text.
    pub dim_opacity: f64,
    /// Whether dimmed regions also get a background wash.
    pub dim_background: bool,
    /// Background color for dimmed regions, as a CSS color string.
    pub dim_background_color: String,
    /// Opacity applied inside the spotlighted scope.
    pub normal_opacity: f64,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dim_opacity: 0.3,
            dim_background: true,
            dim_background_color: String::from("rgba(128, 128, 128, 0.18)"),
            normal_opacity: 1.0,
        }
    }
}

impl SpotlightConfig {
    /// Parse configuration from host settings JSON. Missing or malformed
    /// fields keep their defaults.
    pub fn from_settings(settings: &Value) -> Self {
        let mut config = Self::default();

        if let Some(v) = settings.get("enabled").and_then(|v| v.as_bool()) {
            config.enabled = v;
        }
        if let Some(v) = settings.get("dimOpacity").and_then(|v| v.as_f64()) {
            config.dim_opacity = v;
        }
        if let Some(v) = settings.get("dimBackground").and_then(|v| v.as_bool()) {
            config.dim_background = v;
        }
        if let Some(v) = settings.get("dimBackgroundColor").and_then(|v| v.as_str()) {
            config.dim_background_color = v.to_string();
        }
        if let Some(v) = settings.get("normalOpacity").and_then(|v| v.as_f64()) {
            config.normal_opacity = v;
        }

        log::info!("Spotlight configuration loaded from host settings:");
        log::info!("  enabled: {}", config.enabled);
        log::info!("  dim_opacity: {}", config.dim_opacity);
        log::info!("  dim_background: {}", config.dim_background);
        log::info!("  dim_background_color: {}", config.dim_background_color);
        log::info!("  normal_opacity: {}", config.normal_opacity);

        config
    }

    /// Style for everything outside the resolved scope.
    pub fn dim_style(&self) -> StyleSpec {
        StyleSpec {
            opacity: self.dim_opacity,
            background: self
                .dim_background
                .then(|| self.dim_background_color.clone()),
        }
    }

    /// Style for the scope itself.
    pub fn normal_style(&self) -> StyleSpec {
        StyleSpec {
            opacity: self.normal_opacity,
            background: None,
        }
    }
}
