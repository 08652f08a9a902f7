use serde::Deserialize;
use skills_radar::{RadarOptions, render_with_options};
use wasm_bindgen::prelude::*;

const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillsRadarRenderOptions {
    #[serde(flatten)]
    radar: RadarOptions,
    viewport_width: Option<f32>,
    selected_category: Option<String>,
}

fn render(data_json: &str, options: SkillsRadarRenderOptions) -> Result<String, String> {
    let viewport_width = options.viewport_width.unwrap_or(DEFAULT_VIEWPORT_WIDTH);
    render_with_options(
        data_json,
        &options.radar,
        viewport_width,
        options.selected_category.as_deref(),
    )
    .map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn render_skills_radar(
    data_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SkillsRadarRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SkillsRadarRenderOptions::default()
    };

    render(data_json, options).map_err(|error| JsValue::from_str(&error))
}
