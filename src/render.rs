use crate::animation::{AnimationTarget, EntryAnimation, STROKE_DASH_LENGTH};
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{RadarLayout, RadarPoint};
use crate::model::{SkillCategory, SkillsData, summary_stats};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const TITLE: &str = "Technical Skills Radar";
const PLACEHOLDER: &str =
    "Select a category above or click a point on the radar chart to explore specific skills";

/// Per-pass render settings. The pass id only feeds generated SVG ids, so two
/// passes with the same id and inputs produce identical markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub id: String,
    pub show_tooltips: bool,
    pub animation: Option<EntryAnimation>,
}

impl RenderPass {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            show_tooltips: true,
            animation: None,
        }
    }

    pub fn with_tooltips(mut self, show_tooltips: bool) -> Self {
        self.show_tooltips = show_tooltips;
        self
    }

    pub fn with_animation(mut self, animation: EntryAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn gradient_id(&self) -> String {
        format!("radar-gradient-{}", sanitize_id(&self.id))
    }

    fn animation_style(&self, target: AnimationTarget) -> String {
        self.animation
            .as_ref()
            .and_then(|plan| plan.inline_style(target))
            .map(|style| format!(" style=\"{style}\""))
            .unwrap_or_default()
    }
}

/// Everything the full component markup is built from.
#[derive(Debug, Clone, Copy)]
pub struct ComponentView<'a> {
    pub data: &'a SkillsData,
    pub layout: &'a RadarLayout<'a>,
    pub selected: Option<&'a str>,
    pub theme: &'a Theme,
    pub pass: &'a RenderPass,
    pub feedback: Option<&'a str>,
}

struct BadgeMetrics {
    width: f32,
    height: f32,
    font_size: f32,
    icon_size: f32,
}

impl BadgeMetrics {
    fn for_layout(layout: &RadarLayout<'_>) -> Self {
        if layout.tier.is_mobile() {
            Self {
                width: 70.0,
                height: 20.0,
                font_size: 10.0,
                icon_size: 12.0,
            }
        } else {
            Self {
                width: 90.0,
                height: 24.0,
                font_size: 12.0,
                icon_size: 16.0,
            }
        }
    }
}

/// The radar chart itself, back to front: grid, axes, data polygon, vertices,
/// labels.
pub fn render_svg(layout: &RadarLayout<'_>, theme: &Theme, pass: &RenderPass) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" class=\"radar-svg\" font-family=\"{}\">",
        escape_xml(&theme.font_family)
    ));

    let gradient_id = pass.gradient_id();
    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<radialGradient id=\"{gradient_id}\" cx=\"50%\" cy=\"50%\" r=\"60%\"><stop offset=\"0%\" stop-color=\"{color}\" stop-opacity=\"0.4\"/><stop offset=\"100%\" stop-color=\"{color}\" stop-opacity=\"0.1\"/></radialGradient>",
        color = escape_xml(&theme.primary_color)
    ));
    if pass.animation.is_some() {
        svg.push_str(&format!("<style>{}</style>", EntryAnimation::stylesheet()));
    }
    svg.push_str("</defs>");

    push_grid(&mut svg, layout, theme);
    push_axes(&mut svg, layout, theme);
    push_data_area(&mut svg, layout, theme, pass, &gradient_id);
    push_vertices(&mut svg, layout, theme, pass);
    push_labels(&mut svg, layout, theme, pass);

    svg.push_str("</svg>");
    svg
}

fn push_grid(svg: &mut String, layout: &RadarLayout<'_>, theme: &Theme) {
    let (cx, cy) = layout.center;
    svg.push_str("<g class=\"radar-grid\">");
    for ring in &layout.rings {
        svg.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" opacity=\"0.4\" class=\"grid-circle\"/>",
            ring.radius,
            escape_xml(&theme.grid_color)
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"{}\" font-weight=\"500\" opacity=\"0.8\" class=\"grid-label\">{}</text>",
            cx + 8.0,
            cy - ring.radius - 5.0,
            escape_xml(&theme.tertiary_text_color),
            theme.font_size,
            format_number(ring.level)
        ));
    }
    svg.push_str(&format!(
        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"3\" fill=\"{}\" opacity=\"0.8\" class=\"grid-center\"/>",
        escape_xml(&theme.primary_color)
    ));
    svg.push_str("</g>");
}

fn push_axes(svg: &mut String, layout: &RadarLayout<'_>, theme: &Theme) {
    let (cx, cy) = layout.center;
    svg.push_str("<g class=\"axis-lines\">");
    for point in &layout.points {
        svg.push_str(&format!(
            "<line x1=\"{cx:.2}\" y1=\"{cy:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\" opacity=\"0.3\" class=\"axis-line\"/>",
            point.label_x,
            point.label_y,
            escape_xml(&theme.grid_color)
        ));
    }
    svg.push_str("</g>");
}

fn push_data_area(
    svg: &mut String,
    layout: &RadarLayout<'_>,
    theme: &Theme,
    pass: &RenderPass,
    gradient_id: &str,
) {
    if layout.points.is_empty() {
        return;
    }
    let dash = if pass.animation.is_some() {
        format!(" pathLength=\"{STROKE_DASH_LENGTH}\" stroke-dasharray=\"{STROKE_DASH_LENGTH}\"")
    } else {
        String::new()
    };
    svg.push_str("<g class=\"data-area\">");
    svg.push_str(&format!(
        "<polygon points=\"{}\" fill=\"url(#{gradient_id})\" stroke=\"{}\" stroke-width=\"3\" stroke-linejoin=\"round\" class=\"radar-polygon\"{dash}{}/>",
        points_attr(&layout.points),
        escape_xml(&theme.primary_color),
        pass.animation_style(AnimationTarget::Polygon)
    ));
    svg.push_str("</g>");
}

fn push_vertices(svg: &mut String, layout: &RadarLayout<'_>, theme: &Theme, pass: &RenderPass) {
    let mobile = layout.tier.is_mobile();
    let outer_radius = if mobile { 10.0 } else { 8.0 };
    let inner_radius = if mobile { 4.0 } else { 3.0 };
    svg.push_str("<g class=\"data-points\">");
    for point in &layout.points {
        let category = point.category;
        let color = escape_xml(&category.color);
        let open = format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{outer_radius}\" fill=\"{}\" stroke=\"{color}\" stroke-width=\"3\" class=\"radar-point\" data-action=\"select\" data-category=\"{}\" data-index=\"{}\"{}",
            point.x,
            point.y,
            escape_xml(&theme.surface),
            escape_xml(&category.id),
            point.index,
            pass.animation_style(AnimationTarget::Vertex(point.index))
        );
        svg.push_str(&open);
        if pass.show_tooltips {
            svg.push_str(&format!(
                "><title>{}: {}/{}</title></circle>",
                escape_xml(&category.name),
                format_average(point.average_level),
                format_number(layout.max_level)
            ));
        } else {
            svg.push_str("/>");
        }
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{inner_radius}\" fill=\"{color}\" pointer-events=\"none\" class=\"radar-point-inner\"/>",
            point.x, point.y
        ));
    }
    svg.push_str("</g>");
}

fn push_labels(svg: &mut String, layout: &RadarLayout<'_>, theme: &Theme, pass: &RenderPass) {
    let metrics = BadgeMetrics::for_layout(layout);
    let half_w = metrics.width / 2.0;
    let half_h = metrics.height / 2.0;
    svg.push_str("<g class=\"category-labels\">");
    for point in &layout.points {
        let category = point.category;
        let color = escape_xml(&category.color);
        let (lx, ly) = (point.label_x, point.label_y);
        svg.push_str(&format!(
            "<g class=\"category-label-group\" data-category=\"{}\"{}>",
            escape_xml(&category.id),
            pass.animation_style(AnimationTarget::Label(point.index))
        ));
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{}\" rx=\"{half_h}\" ry=\"{half_h}\" fill=\"{}\" stroke=\"{color}\" stroke-width=\"2\" opacity=\"0.95\"/>",
            lx - half_w,
            ly - half_h,
            metrics.width,
            metrics.height,
            escape_xml(&theme.surface)
        ));
        let average = format_average(point.average_level);
        if layout.tier.is_mobile() {
            // Narrow screens: icon over the numeric level, no name.
            svg.push_str(&format!(
                "<text x=\"{lx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}\" class=\"category-icon\">{}</text>",
                ly - 2.0,
                metrics.icon_size,
                escape_xml(&category.icon)
            ));
            svg.push_str(&format!(
                "<text x=\"{lx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{color}\" font-size=\"{}\" font-weight=\"600\" class=\"category-level\">{average}</text>",
                ly + 8.0,
                metrics.font_size - 2.0
            ));
        } else {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}\" class=\"category-icon\">{}</text>",
                lx - 25.0,
                ly + 4.0,
                metrics.icon_size,
                escape_xml(&category.icon)
            ));
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{color}\" font-size=\"{}\" font-weight=\"600\" class=\"category-name\">{}</text>",
                lx + 5.0,
                ly - 2.0,
                metrics.font_size,
                escape_xml(&category.name)
            ));
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"{}\" font-weight=\"500\" class=\"category-level\">{average}/{}</text>",
                lx + 5.0,
                ly + 8.0,
                escape_xml(&theme.secondary_text_color),
                metrics.font_size - 2.0,
                format_number(layout.max_level)
            ));
        }
        svg.push_str("</g>");
    }
    svg.push_str("</g>");
}

/// The whole component: header, filters, chart with legend, detail panel and
/// summary statistics.
pub fn render_component(view: &ComponentView<'_>) -> String {
    let layout = view.layout;
    let theme = view.theme;
    let mut html = String::new();

    html.push_str(&format!(
        "<div class=\"enhanced-skills-radar\" data-render-pass=\"{}\" style=\"max-width: 100%; margin: 0 auto; font-family: {};\">",
        escape_xml(&view.pass.id),
        escape_xml(&theme.font_family)
    ));

    html.push_str(&format!(
        "<div class=\"radar-header\" style=\"text-align: center; margin-bottom: 2rem;\"><h2 style=\"color: {}; margin: 0 0 0.5rem 0;\">{TITLE}</h2><p style=\"color: {}; margin: 0;\">Interactive visualization of expertise across {} skill domains</p></div>",
        escape_xml(&theme.primary_text_color),
        escape_xml(&theme.secondary_text_color),
        layout.points.len()
    ));

    html.push_str("<div class=\"radar-controls\" style=\"display: flex; justify-content: center; gap: 1rem; margin-bottom: 2rem; flex-wrap: wrap;\">");
    push_filter_button(
        &mut html,
        None,
        &theme.primary_color,
        "\u{1F3AF} All Skills",
        view.selected.is_none(),
        theme,
    );
    for category in &view.data.skill_categories {
        push_filter_button(
            &mut html,
            Some(category.id.as_str()),
            &category.color,
            &format!("{} {}", category.icon, category.name),
            view.selected == Some(category.id.as_str()),
            theme,
        );
    }
    html.push_str("</div>");

    html.push_str("<div class=\"radar-chart-container\" style=\"position: relative; display: flex; justify-content: center; flex-wrap: wrap;\">");
    html.push_str(&render_svg(layout, theme, view.pass));
    push_legend(&mut html, layout, theme);
    html.push_str("</div>");

    html.push_str("<div class=\"skills-detail-panel\" style=\"margin-top: 2rem;\">");
    let selected = view.selected.and_then(|id| view.data.category(id));
    match selected {
        Some(category) => push_details(&mut html, category, layout.max_level, theme),
        None => html.push_str(&format!(
            "<div class=\"skills-overview\" style=\"text-align: center; color: {}; padding: 2rem;\"><p>{PLACEHOLDER}</p></div>",
            escape_xml(&theme.secondary_text_color)
        )),
    }
    html.push_str("</div>");

    push_summary(&mut html, layout, theme);

    if let Some(message) = view.feedback {
        // Static passes carry no stylesheet in the chart.
        if view.pass.animation.is_none() {
            html.push_str(&format!("<style>{}</style>", EntryAnimation::toast_keyframes()));
        }
        html.push_str(&format!(
            "<div class=\"swipe-feedback\" role=\"status\" style=\"position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); background: rgba(0,0,0,0.8); color: #ffffff; padding: 0.5rem 1rem; border-radius: 20px; pointer-events: none; {}\">{}</div>",
            EntryAnimation::toast_style(),
            escape_xml(message)
        ));
    }

    html.push_str("</div>");
    html
}

fn push_filter_button(
    html: &mut String,
    category_id: Option<&str>,
    color: &str,
    label: &str,
    active: bool,
    theme: &Theme,
) {
    let color = escape_xml(color);
    let surface = escape_xml(&theme.surface);
    let (background, foreground) = if active {
        (color.clone(), surface)
    } else {
        (surface, color.clone())
    };
    html.push_str(&format!(
        "<button type=\"button\" class=\"category-filter-btn{}\" data-action=\"filter\" data-category=\"{}\" style=\"padding: 0.5rem 1rem; border: 2px solid {color}; background: {background}; color: {foreground}; border-radius: 25px; font-weight: 600; cursor: pointer;\">{}</button>",
        if active { " active" } else { "" },
        escape_xml(category_id.unwrap_or("")),
        escape_xml(label)
    ));
}

fn push_legend(html: &mut String, layout: &RadarLayout<'_>, theme: &Theme) {
    let mobile = layout.tier.is_mobile();
    let positioning = if mobile {
        "position: static; margin: 1rem auto 0 auto; max-width: 280px; width: calc(100% - 1rem);"
    } else {
        "position: absolute; top: 20px; right: 20px; min-width: 200px;"
    };
    let swatch = if mobile { 10 } else { 12 };
    html.push_str(&format!(
        "<div class=\"legend-panel\" style=\"{positioning} background: {}; border-radius: 12px; padding: 1rem;\">",
        escape_xml(&theme.surface)
    ));
    html.push_str(&format!(
        "<h4 style=\"margin: 0 0 0.75rem 0; color: {};\">\u{1F4CA} Skill Levels</h4>",
        escape_xml(&theme.primary_text_color)
    ));
    html.push_str("<div class=\"legend-items\">");
    for point in &layout.points {
        let category = point.category;
        let name = if mobile { &category.icon } else { &category.name };
        html.push_str(&format!(
            "<div class=\"legend-item\" data-category=\"{}\" style=\"display: flex; align-items: center; gap: 0.5rem; margin: 0.5rem 0;\"><span class=\"legend-swatch\" style=\"width: {swatch}px; height: {swatch}px; border-radius: 50%; background: {};\"></span><span style=\"color: {};\">{}: <strong>{}/{}</strong></span></div>",
            escape_xml(&category.id),
            escape_xml(&category.color),
            escape_xml(&theme.secondary_text_color),
            escape_xml(name),
            format_average(point.average_level),
            format_number(layout.max_level)
        ));
    }
    html.push_str("</div></div>");
}

fn push_details(html: &mut String, category: &SkillCategory, max_level: f32, theme: &Theme) {
    let color = escape_xml(&category.color);
    html.push_str(&format!(
        "<div class=\"selected-category-details\" data-category=\"{}\" style=\"background: {}; border-radius: 12px; padding: 1.5rem; border: 2px solid {color};\">",
        escape_xml(&category.id),
        escape_xml(&theme.surface)
    ));
    html.push_str(&format!(
        "<h3 style=\"color: {color}; margin: 0 0 1rem 0;\">{} {}</h3>",
        escape_xml(&category.icon),
        escape_xml(&category.name)
    ));
    html.push_str("<div class=\"skills-grid\" style=\"display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 1rem;\">");
    for skill in &category.skills {
        let percent = (skill.level / max_level * 100.0).clamp(0.0, 100.0);
        html.push_str(&format!(
            "<div class=\"skill-card\" style=\"background: {}; border-radius: 8px; padding: 1rem; border-left: 4px solid {color};\">",
            escape_xml(&theme.muted_surface)
        ));
        html.push_str(&format!(
            "<div style=\"display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.5rem;\"><span class=\"skill-name\" style=\"font-weight: 600; color: {};\">{}</span><span class=\"skill-level\" style=\"background: {color}; color: #ffffff; padding: 0.25rem 0.5rem; border-radius: 12px;\">{}/{}</span></div>",
            escape_xml(&theme.primary_text_color),
            escape_xml(&skill.name),
            format_number(skill.level),
            format_number(max_level)
        ));
        html.push_str(&format!(
            "<div class=\"skill-experience\" style=\"color: {}; margin-bottom: 0.5rem;\">{} years experience</div>",
            escape_xml(&theme.secondary_text_color),
            format_number(skill.years_of_experience)
        ));
        html.push_str(&format!(
            "<div class=\"skill-progress\" style=\"width: 100%; background: {}; border-radius: 4px; height: 6px;\"><div style=\"width: {}%; background: {color}; height: 100%; border-radius: 4px;\"></div></div>",
            escape_xml(&theme.track_color),
            format_number(percent)
        ));
        html.push_str("</div>");
    }
    html.push_str("</div></div>");
}

fn push_summary(html: &mut String, layout: &RadarLayout<'_>, theme: &Theme) {
    let stats = summary_stats(layout.points.iter().map(|point| point.category));
    html.push_str("<div class=\"radar-summary\" style=\"margin-top: 2rem; display: flex; justify-content: center; gap: 2rem; flex-wrap: wrap;\">");
    let items = [
        (stats.total_skills.to_string(), "Total Skills"),
        (format_average(stats.average_level), "Avg Level"),
        (format!("{}+", format_number(stats.max_experience)), "Max Experience"),
    ];
    for (value, caption) in items {
        html.push_str(&format!(
            "<div class=\"stat-item\" style=\"text-align: center; padding: 1rem; background: {}; border-radius: 12px; min-width: 120px;\"><div class=\"stat-value\" style=\"font-size: 2rem; font-weight: 700; color: {};\">{value}</div><div class=\"stat-caption\" style=\"color: {};\">{caption}</div></div>",
            escape_xml(&theme.surface),
            escape_xml(&theme.primary_color),
            escape_xml(&theme.secondary_text_color)
        ));
    }
    html.push_str("</div>");
}

/// Error panel shown in place of the chart, with a retry hook.
pub fn render_error(message: &str, theme: &Theme) -> String {
    format!(
        "<div class=\"radar-error\" role=\"alert\" style=\"text-align: center; padding: 3rem; background: {surface}; border-radius: 12px;\"><div class=\"radar-error-icon\" style=\"font-size: 3rem; margin-bottom: 1rem;\">\u{26A0}\u{FE0F}</div><h3 style=\"color: {error}; margin-bottom: 1rem;\">Unable to Load Skills Radar</h3><p class=\"radar-error-message\" style=\"color: {muted}; margin-bottom: 1rem;\">{}</p><button type=\"button\" class=\"radar-retry\" data-action=\"retry\" style=\"padding: 0.75rem 1.5rem; background: {primary}; color: #ffffff; border: none; border-radius: 8px; cursor: pointer; font-weight: 600;\">Try Again</button></div>",
        escape_xml(message),
        surface = escape_xml(&theme.surface),
        error = escape_xml(&theme.error_color),
        muted = escape_xml(&theme.secondary_text_color),
        primary = escape_xml(&theme.primary_color),
    )
}

fn points_attr(points: &[RadarPoint<'_>]) -> String {
    points
        .iter()
        .map(|point| format!("{:.2},{:.2}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}

fn format_average(value: f32) -> String {
    format!("{value:.1}")
}

fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '-' })
        .collect()
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Inter".to_string());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let scale = render_cfg.scale.max(0.1);
    let width = ((size.width() as f32) * scale).ceil() as u32;
    let height = ((size.height() as f32) * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_hex_color(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_hex_color(input: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = input.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|ch| [ch, ch]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(resvg::tiny_skia::Color::from_rgba8(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
        255,
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
