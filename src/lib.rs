pub mod animation;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "runtime")]
pub mod component;
pub mod config;
pub mod controller;
#[cfg(feature = "runtime")]
pub mod debounce;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod render;
pub mod sizing;
#[cfg(feature = "runtime")]
pub mod source;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
#[cfg(feature = "runtime")]
pub use component::{MemoryMount, Mount, Page, RadarComponent, VisualizationState};
pub use config::{Config, LayoutConfig, RadarOptions, ResolvedOptions};
pub use controller::{RadarEvent, SwipeDirection, ViewState, transition};
pub use error::{DataError, RadarError, SourceError};
pub use layout::{RadarLayout, RadarPoint, compute_radar_layout, filtered_categories};
pub use model::{Skill, SkillCategory, SkillsData};
pub use render::{ComponentView, RenderPass, render_component, render_error, render_svg};
pub use sizing::{ChartSize, DeviceTier};
#[cfg(feature = "runtime")]
pub use source::{CachedSource, FileSource, SkillsSource, StaticSource};
pub use theme::Theme;

use animation::EntryAnimation;

/// One-shot render of the full component markup, without a mount.
///
/// `selected` must name a category in the dataset.
pub fn render_with_options(
    data_json: &str,
    options: &RadarOptions,
    viewport_width: f32,
    selected: Option<&str>,
) -> Result<String, RadarError> {
    let data = SkillsData::from_json(data_json)?;
    let resolved = options.resolve(viewport_width, &Theme::modern());
    render_markup(&data, &resolved, &LayoutConfig::default(), selected, true)
}

/// Lays out and renders `data` for already-resolved options.
pub fn render_markup(
    data: &SkillsData,
    resolved: &ResolvedOptions,
    layout_config: &LayoutConfig,
    selected: Option<&str>,
    animate: bool,
) -> Result<String, RadarError> {
    if let Some(id) = selected {
        if data.category(id).is_none() {
            return Err(RadarError::UnknownCategory(id.to_string()));
        }
    }
    let categories = filtered_categories(data, selected);
    let layout = compute_radar_layout(&categories, resolved.size, layout_config);
    let mut pass = RenderPass::new("radar").with_tooltips(resolved.show_tooltips);
    if animate {
        pass = pass.with_animation(EntryAnimation::plan(
            layout.points.len(),
            resolved.animation_duration_ms,
        ));
    }
    Ok(render_component(&ComponentView {
        data,
        layout: &layout,
        selected,
        theme: &resolved.theme,
        pass: &pass,
        feedback: None,
    }))
}
