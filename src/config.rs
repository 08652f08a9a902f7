use crate::sizing::{ChartSize, DeviceTier, RESIZE_THRESHOLD};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

const GRID_LEVELS: [f32; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];

pub const DESKTOP_ANIMATION_MS: u32 = 1200;
pub const MOBILE_ANIMATION_MS: u32 = 800;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    pub max_level: f32,
    pub label_margin: f32,
    pub label_offset: f32,
    pub label_offset_mobile: f32,
    pub grid_levels: Vec<f32>,
    pub resize_threshold: f32,
    pub resize_debounce_ms: u64,
    pub swipe_min_distance: f32,
    pub swipe_max_duration_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_level: crate::model::MAX_LEVEL,
            label_margin: 80.0,
            label_offset: 50.0,
            label_offset_mobile: 25.0,
            grid_levels: GRID_LEVELS.to_vec(),
            resize_threshold: RESIZE_THRESHOLD,
            resize_debounce_ms: 300,
            swipe_min_distance: 50.0,
            swipe_max_duration_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub scale: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

/// Options a radar component is mounted with. Every key is optional; unset
/// values resolve against the viewport in [`RadarOptions::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RadarOptions {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub animation_duration: Option<u32>,
    pub interactive: Option<bool>,
    pub theme: Option<String>,
    pub show_tooltips: Option<bool>,
}

/// Options after defaults have been applied for a given viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub size: ChartSize,
    pub animation_duration_ms: u32,
    pub interactive: bool,
    pub theme: Theme,
    pub show_tooltips: bool,
}

impl RadarOptions {
    /// Applies defaults for `viewport_width`. `base_theme` is used when no
    /// theme name is given or the name is unknown.
    pub fn resolve(&self, viewport_width: f32, base_theme: &Theme) -> ResolvedOptions {
        let mut size = ChartSize::for_viewport(viewport_width);
        if let Some(width) = self.width {
            size.width = width;
        }
        if let Some(height) = self.height {
            size.height = height;
        }
        let mobile = size.tier.is_mobile();
        let theme = match self.theme.as_deref() {
            Some(name) => Theme::by_name(name).unwrap_or_else(|| {
                log::warn!("Unknown theme \"{name}\", using configured theme");
                base_theme.clone()
            }),
            None => base_theme.clone(),
        };
        ResolvedOptions {
            size,
            animation_duration_ms: self
                .animation_duration
                .unwrap_or_else(|| default_animation_duration(size.tier)),
            interactive: self.interactive.unwrap_or(true),
            theme,
            // Hover tooltips are useless on touch screens.
            show_tooltips: self.show_tooltips.unwrap_or(true) && !mobile,
        }
    }
}

pub fn default_animation_duration(tier: DeviceTier) -> u32 {
    if tier.is_mobile() {
        MOBILE_ANIMATION_MS
    } else {
        DESKTOP_ANIMATION_MS
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    scale: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    primary_color: Option<String>,
    primary_text_color: Option<String>,
    secondary_text_color: Option<String>,
    tertiary_text_color: Option<String>,
    grid_color: Option<String>,
    surface: Option<String>,
    muted_surface: Option<String>,
    track_color: Option<String>,
    error_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    max_level: Option<f32>,
    label_margin: Option<f32>,
    label_offset: Option<f32>,
    label_offset_mobile: Option<f32>,
    grid_levels: Option<Vec<f32>>,
    resize_threshold: Option<f32>,
    resize_debounce_ms: Option<u64>,
    swipe_min_distance: Option<f32>,
    swipe_max_duration_ms: Option<u64>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and merges it over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => log::warn!("Unknown theme \"{theme_name}\" in config, keeping modern"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.primary_color {
            config.theme.primary_color = v;
        }
        if let Some(v) = vars.primary_text_color {
            config.theme.primary_text_color = v;
        }
        if let Some(v) = vars.secondary_text_color {
            config.theme.secondary_text_color = v;
        }
        if let Some(v) = vars.tertiary_text_color {
            config.theme.tertiary_text_color = v;
        }
        if let Some(v) = vars.grid_color {
            config.theme.grid_color = v;
        }
        if let Some(v) = vars.surface {
            config.theme.surface = v;
        }
        if let Some(v) = vars.muted_surface {
            config.theme.muted_surface = v;
        }
        if let Some(v) = vars.track_color {
            config.theme.track_color = v;
        }
        if let Some(v) = vars.error_color {
            config.theme.error_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.max_level {
            config.layout.max_level = v.max(f32::EPSILON);
        }
        if let Some(v) = layout.label_margin {
            config.layout.label_margin = v;
        }
        if let Some(v) = layout.label_offset {
            config.layout.label_offset = v;
        }
        if let Some(v) = layout.label_offset_mobile {
            config.layout.label_offset_mobile = v;
        }
        if let Some(v) = layout.grid_levels {
            config.layout.grid_levels = v;
        }
        if let Some(v) = layout.resize_threshold {
            config.layout.resize_threshold = v;
        }
        if let Some(v) = layout.resize_debounce_ms {
            config.layout.resize_debounce_ms = v;
        }
        if let Some(v) = layout.swipe_min_distance {
            config.layout.swipe_min_distance = v;
        }
        if let Some(v) = layout.swipe_max_duration_ms {
            config.layout.swipe_max_duration_ms = v;
        }
    }

    if let Some(scale) = parsed.scale {
        config.render.scale = scale.max(0.1);
    }
    config.render.background = config.theme.background.clone();

    Ok(config)
}
