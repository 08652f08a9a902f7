use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use skills_radar::animation::EntryAnimation;
use skills_radar::layout_dump::write_layout_dump;
use skills_radar::{
    ChartSize, LayoutConfig, RadarError, RadarOptions, RenderPass, SkillsData, Theme,
    compute_radar_layout, filtered_categories, render_svg, render_with_options,
};

const TWO_CATEGORIES: &str = r##"{"skillCategories": [
    {"id": "a", "name": "A", "icon": "A", "color": "#f00", "skills": [{"name": "s", "level": 10, "yearsOfExperience": 3}]},
    {"id": "b", "name": "B", "icon": "B", "color": "#0f0", "skills": [{"name": "t", "level": 0, "yearsOfExperience": 1}]}
]}"##;

fn fixture() -> SkillsData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("skills-data.json");
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    SkillsData::from_json(&input).expect("fixture should validate")
}

fn assert_valid_svg(svg: &str) {
    assert!(svg.starts_with("<svg"), "missing <svg tag");
    assert!(svg.ends_with("</svg>"), "missing </svg tag");
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn fixture_drops_empty_category() {
    let data = fixture();
    assert_eq!(data.category_ids(), vec!["frontend", "backend", "devops", "data"]);
    assert!(data.category("research").is_none());
    assert_eq!(data.summary["focus"], "full-stack");
}

#[test]
fn fixture_queries() {
    let data = fixture();
    let top: Vec<&str> = data
        .top_skills(3)
        .iter()
        .map(|entry| entry.skill.name.as_str())
        .collect();
    assert_eq!(top, vec!["TypeScript", "Rust", "CSS"]);
    assert_eq!(data.all_skills().len(), 8);
    assert_eq!(data.search("ci").len(), 1);

    let stats = data.summary_stats();
    assert_eq!(stats.total_skills, 8);
    assert!((stats.average_level - 7.75).abs() < 1e-5);
    assert_eq!(stats.max_experience, 9.0);
}

#[test]
fn render_fixture_at_every_tier() {
    let data = fixture();
    let categories = filtered_categories(&data, None);
    for viewport in [360.0, 600.0, 900.0, 1440.0] {
        let size = ChartSize::for_viewport(viewport);
        let layout = compute_radar_layout(&categories, size, &LayoutConfig::default());
        assert_eq!(layout.points.len(), 4);
        for (idx, point) in layout.points.iter().enumerate() {
            let expected = idx as f32 * TAU / 4.0 - FRAC_PI_2;
            assert!((point.angle - expected).abs() < 1e-4);
            assert!(point.distance_from(layout.center) <= layout.radius + 1e-3);
        }
        let svg = render_svg(&layout, &Theme::modern(), &RenderPass::new("suite"));
        assert_valid_svg(&svg);
        assert_eq!(count(&svg, "class=\"radar-point\""), 4);
    }
}

#[test]
fn two_category_fixture_places_extremes() {
    let data = SkillsData::from_json(TWO_CATEGORIES).unwrap();
    let categories = filtered_categories(&data, None);
    let layout = compute_radar_layout(
        &categories,
        ChartSize::for_viewport(1280.0),
        &LayoutConfig::default(),
    );
    let a = &layout.points[0];
    let b = &layout.points[1];
    assert!((a.distance_from(layout.center) - layout.radius).abs() < 1e-3);
    assert!(b.distance_from(layout.center) < 1e-3);

    let svg = render_svg(&layout, &Theme::modern(), &RenderPass::new("two"));
    assert_eq!(count(&svg, "class=\"axis-line\""), 2);
    assert_eq!(count(&svg, "class=\"radar-point\""), 2);
}

#[test]
fn rendering_is_idempotent() {
    let data = fixture();
    let categories = filtered_categories(&data, Some("backend"));
    let layout = compute_radar_layout(
        &categories,
        ChartSize::for_viewport(1280.0),
        &LayoutConfig::default(),
    );
    let pass = RenderPass::new("same").with_animation(EntryAnimation::plan(1, 1200));
    let first = render_svg(&layout, &Theme::dark(), &pass);
    let second = render_svg(&layout, &Theme::dark(), &pass);
    assert_eq!(first, second);

    let other = render_svg(&layout, &Theme::dark(), &RenderPass::new("other"));
    assert_ne!(first, other);
}

#[test]
fn one_shot_render_respects_options() {
    let options: RadarOptions =
        serde_json::from_str(r#"{"showTooltips": true, "theme": "dark"}"#).unwrap();
    let desktop = render_with_options(TWO_CATEGORIES, &options, 1280.0, Some("a")).unwrap();
    assert!(desktop.contains("<title>A: 10.0/10</title>"));
    assert!(desktop.contains(&Theme::dark().surface));
    assert!(desktop.contains("class=\"selected-category-details\""));

    let mobile = render_with_options(TWO_CATEGORIES, &options, 400.0, None).unwrap();
    assert!(!mobile.contains("<title>"));
    assert!(mobile.contains("Select a category above"));
}

#[test]
fn one_shot_render_reports_errors() {
    let options = RadarOptions::default();
    assert!(matches!(
        render_with_options(TWO_CATEGORIES, &options, 1280.0, Some("zzz")),
        Err(RadarError::UnknownCategory(id)) if id == "zzz"
    ));
    assert!(matches!(
        render_with_options("[]", &options, 1280.0, None),
        Err(RadarError::InvalidData(_))
    ));
}

#[test]
fn layout_dump_is_written() {
    let data = fixture();
    let categories = filtered_categories(&data, None);
    let layout = compute_radar_layout(
        &categories,
        ChartSize::for_viewport(600.0),
        &LayoutConfig::default(),
    );
    let path = std::env::temp_dir().join(format!("skills-radar-dump-{}.json", std::process::id()));
    write_layout_dump(&path, &layout).unwrap();
    let dumped: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(dumped["tier"], "mobile");
    assert_eq!(dumped["points"].as_array().unwrap().len(), 4);
    assert_eq!(dumped["points"][3]["categoryId"], "data");
}
