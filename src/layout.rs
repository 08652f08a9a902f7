use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::LayoutConfig;
use crate::model::{SkillCategory, SkillsData};
use crate::sizing::{ChartSize, DeviceTier};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRing {
    pub level: f32,
    pub radius: f32,
}

/// One category's position on the chart. Rebuilt on every render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarPoint<'a> {
    pub category: &'a SkillCategory,
    pub index: usize,
    pub average_level: f32,
    pub angle: f32,
    pub x: f32,
    pub y: f32,
    pub label_x: f32,
    pub label_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarLayout<'a> {
    pub width: f32,
    pub height: f32,
    pub center: (f32, f32),
    pub radius: f32,
    pub label_radius: f32,
    pub max_level: f32,
    pub tier: DeviceTier,
    pub rings: Vec<GridRing>,
    pub points: Vec<RadarPoint<'a>>,
}

impl RadarPoint<'_> {
    pub fn distance_from(&self, center: (f32, f32)) -> f32 {
        (self.x - center.0).hypot(self.y - center.1)
    }
}

/// Categories visible for a selection. An unknown selection shows everything.
pub fn filtered_categories<'a>(
    data: &'a SkillsData,
    selected: Option<&str>,
) -> Vec<&'a SkillCategory> {
    if let Some(id) = selected {
        if let Some(category) = data.category(id) {
            return vec![category];
        }
        log::debug!("Selected category \"{id}\" not in dataset, showing all");
    }
    data.skill_categories.iter().collect()
}

/// Places categories evenly around the chart, index 0 at the top and
/// proceeding clockwise.
pub fn compute_radar_layout<'a>(
    categories: &[&'a SkillCategory],
    size: ChartSize,
    config: &LayoutConfig,
) -> RadarLayout<'a> {
    let width = size.width.max(1.0);
    let height = size.height.max(1.0);
    let center = (width / 2.0, height / 2.0);
    let radius = (width.min(height) / 2.0 - config.label_margin).max(0.0);
    let label_radius = if size.tier.is_mobile() {
        radius + config.label_offset_mobile
    } else {
        radius + config.label_offset
    };
    let max_level = config.max_level.max(f32::EPSILON);

    let rings = config
        .grid_levels
        .iter()
        .map(|level| GridRing {
            level: *level,
            radius: level / max_level * radius,
        })
        .collect();

    let count = categories.len();
    let mut points = Vec::with_capacity(count);
    for (index, category) in categories.iter().enumerate() {
        if category.skills.is_empty() {
            log::warn!("Category '{}' has no skills, placing it at the center", category.id);
        }
        let angle = index as f32 / count as f32 * TAU - FRAC_PI_2;
        let average_level = category.average_level().clamp(0.0, max_level);
        let distance = average_level / max_level * radius;
        let (sin, cos) = angle.sin_cos();
        points.push(RadarPoint {
            category,
            index,
            average_level,
            angle,
            x: center.0 + cos * distance,
            y: center.1 + sin * distance,
            label_x: center.0 + cos * label_radius,
            label_y: center.1 + sin * label_radius,
        });
    }

    RadarLayout {
        width,
        height,
        center,
        radius,
        label_radius,
        max_level,
        tier: size.tier,
        rings,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;

    fn category(id: &str, levels: &[f32]) -> SkillCategory {
        SkillCategory {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "*".to_string(),
            color: "#123456".to_string(),
            skills: levels
                .iter()
                .enumerate()
                .map(|(idx, level)| Skill {
                    name: format!("{id}-{idx}"),
                    level: *level,
                    years_of_experience: 1.0,
                    description: String::new(),
                    projects: Vec::new(),
                })
                .collect(),
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-3, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn angles_are_evenly_spaced_from_top() {
        for count in 1..=9 {
            let owned: Vec<SkillCategory> =
                (0..count).map(|idx| category(&format!("c{idx}"), &[5.0])).collect();
            let refs: Vec<&SkillCategory> = owned.iter().collect();
            let layout = compute_radar_layout(
                &refs,
                ChartSize::for_viewport(1280.0),
                &LayoutConfig::default(),
            );
            assert_eq!(layout.points.len(), count);
            for (idx, point) in layout.points.iter().enumerate() {
                assert_eq!(point.index, idx);
                assert_eq!(point.category.id, format!("c{idx}"));
                assert_close(point.angle, -FRAC_PI_2 + idx as f32 * TAU / count as f32);
            }
        }
    }

    #[test]
    fn vertex_distance_scales_with_average_level() {
        let full = category("full", &[10.0, 10.0]);
        let empty = category("empty", &[0.0]);
        let half = category("half", &[4.0, 6.0]);
        let layout = compute_radar_layout(
            &[&full, &empty, &half],
            ChartSize::for_viewport(1280.0),
            &LayoutConfig::default(),
        );
        // 700px chart: 350 - 80
        assert_close(layout.radius, 270.0);
        assert_close(layout.points[0].distance_from(layout.center), 270.0);
        assert_close(layout.points[1].distance_from(layout.center), 0.0);
        assert_close(layout.points[2].distance_from(layout.center), 135.0);
        // first vertex sits straight above the center
        assert_close(layout.points[0].x, 350.0);
        assert_close(layout.points[0].y, 80.0);
    }

    #[test]
    fn skill_less_category_sits_at_center() {
        let full = category("full", &[10.0]);
        let bare = category("bare", &[]);
        let layout = compute_radar_layout(
            &[&full, &bare],
            ChartSize::for_viewport(1280.0),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.points.len(), 2);
        assert_close(layout.points[1].average_level, 0.0);
        assert_close(layout.points[1].distance_from(layout.center), 0.0);
    }

    #[test]
    fn out_of_range_levels_are_clamped() {
        let wild = category("wild", &[25.0]);
        let negative = category("neg", &[-4.0]);
        let layout = compute_radar_layout(
            &[&wild, &negative],
            ChartSize::for_viewport(1280.0),
            &LayoutConfig::default(),
        );
        assert_close(layout.points[0].average_level, 10.0);
        assert_close(layout.points[0].distance_from(layout.center), layout.radius);
        assert_close(layout.points[1].distance_from(layout.center), 0.0);
    }

    #[test]
    fn label_anchor_moves_closer_on_mobile() {
        let only = category("only", &[5.0]);
        let desktop = compute_radar_layout(
            &[&only],
            ChartSize::for_viewport(1280.0),
            &LayoutConfig::default(),
        );
        assert_close(desktop.label_radius, desktop.radius + 50.0);
        assert_close(desktop.points[0].label_y, desktop.center.1 - desktop.label_radius);

        let mobile = compute_radar_layout(
            &[&only],
            ChartSize::for_viewport(500.0),
            &LayoutConfig::default(),
        );
        assert_close(mobile.radius, 120.0);
        assert_close(mobile.label_radius, 145.0);
    }

    #[test]
    fn rings_cover_configured_levels() {
        let only = category("only", &[5.0]);
        let layout = compute_radar_layout(
            &[&only],
            ChartSize::for_viewport(1280.0),
            &LayoutConfig::default(),
        );
        let levels: Vec<f32> = layout.rings.iter().map(|ring| ring.level).collect();
        assert_eq!(levels, vec![2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_close(layout.rings[4].radius, layout.radius);
    }

    #[test]
    fn tiny_charts_collapse_radius_to_zero() {
        let only = category("only", &[5.0]);
        let size = ChartSize {
            width: 100.0,
            height: 100.0,
            tier: DeviceTier::Desktop,
        };
        let layout = compute_radar_layout(&[&only], size, &LayoutConfig::default());
        assert_eq!(layout.radius, 0.0);
        assert_close(layout.points[0].distance_from(layout.center), 0.0);
    }

    #[test]
    fn filtering_selects_single_category() {
        let data = SkillsData {
            skill_categories: vec![category("a", &[1.0]), category("b", &[2.0])],
            summary: Default::default(),
        };
        assert_eq!(filtered_categories(&data, None).len(), 2);
        let only_b = filtered_categories(&data, Some("b"));
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].id, "b");
        assert_eq!(filtered_categories(&data, Some("zzz")).len(), 2);
    }
}
