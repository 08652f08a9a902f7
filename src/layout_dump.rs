use crate::layout::RadarLayout;
use crate::sizing::DeviceTier;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub center: [f32; 2],
    pub radius: f32,
    pub label_radius: f32,
    pub max_level: f32,
    pub tier: DeviceTier,
    pub rings: Vec<RingDump>,
    pub points: Vec<PointDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingDump {
    pub level: f32,
    pub radius: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDump {
    pub index: usize,
    pub category_id: String,
    pub category_name: String,
    pub color: String,
    pub skill_count: usize,
    pub average_level: f32,
    pub angle: f32,
    pub vertex: [f32; 2],
    pub label: [f32; 2],
}

impl LayoutDump {
    pub fn from_layout(layout: &RadarLayout<'_>) -> Self {
        let rings = layout
            .rings
            .iter()
            .map(|ring| RingDump {
                level: ring.level,
                radius: ring.radius,
            })
            .collect();

        let points = layout
            .points
            .iter()
            .map(|point| PointDump {
                index: point.index,
                category_id: point.category.id.clone(),
                category_name: point.category.name.clone(),
                color: point.category.color.clone(),
                skill_count: point.category.skills.len(),
                average_level: point.average_level,
                angle: point.angle,
                vertex: [point.x, point.y],
                label: [point.label_x, point.label_y],
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            center: [layout.center.0, layout.center.1],
            radius: layout.radius,
            label_radius: layout.label_radius,
            max_level: layout.max_level,
            tier: layout.tier,
            rings,
            points,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &RadarLayout<'_>) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    log::debug!("Wrote layout dump to {}", path.display());
    Ok(())
}
