use crate::animation::EntryAnimation;
use crate::config::{RadarOptions, load_config};
use crate::error::RadarError;
use crate::layout::{compute_radar_layout, filtered_categories};
use crate::layout_dump::write_layout_dump;
use crate::model::SkillsData;
use crate::render::{ComponentView, RenderPass, render_component, render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "skradar", version, about = "Skills radar chart renderer")]
pub struct Args {
    /// Input skills JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/html). Defaults to stdout for SVG and HTML if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file (theme, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width the chart is sized for
    #[arg(short = 'w', long = "width", default_value_t = 1280.0)]
    pub viewport_width: f32,

    /// Theme name, overriding the config file
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Only show this category, with its detail panel
    #[arg(long = "select")]
    pub select: Option<String>,

    /// Leave out the entry animation
    #[arg(long = "static")]
    pub no_animation: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Html,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let data = SkillsData::from_json(&input)?;
    let selected = args.select.as_deref();
    if let Some(id) = selected {
        if data.category(id).is_none() {
            return Err(RadarError::UnknownCategory(id.to_string()).into());
        }
    }

    let options = RadarOptions {
        theme: args.theme.clone(),
        ..Default::default()
    };
    let resolved = options.resolve(args.viewport_width, &config.theme);
    let categories = filtered_categories(&data, selected);
    let layout = compute_radar_layout(&categories, resolved.size, &config.layout);
    log::info!(
        "Laid out {} categories on a {}x{} chart ({:?})",
        layout.points.len(),
        layout.width,
        layout.height,
        layout.tier
    );

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let mut pass = RenderPass::new("skradar").with_tooltips(resolved.show_tooltips);
    // Rasterized output cannot play CSS animations.
    let animate = !args.no_animation && args.output_format != OutputFormat::Png;
    if animate {
        pass = pass.with_animation(EntryAnimation::plan(
            layout.points.len(),
            resolved.animation_duration_ms,
        ));
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &resolved.theme, &pass);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Html => {
            let html = render_component(&ComponentView {
                data: &data,
                layout: &layout,
                selected,
                theme: &resolved.theme,
                pass: &pass,
                feedback: None,
            });
            write_output_svg(&html, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&layout, &resolved.theme, &pass);
            write_png(&svg, &output, &config.render, &resolved.theme)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
    theme: &crate::theme::Theme,
) -> Result<()> {
    crate::render::write_output_png(svg, output, render_cfg, theme)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &crate::config::RenderConfig,
    _theme: &crate::theme::Theme,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "skradar",
            "-i",
            "skills.json",
            "-e",
            "html",
            "-w",
            "500",
            "--select",
            "backend",
            "--static",
            "--dump-layout",
            "layout.json",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("skills.json")));
        assert_eq!(args.output_format, OutputFormat::Html);
        assert_eq!(args.viewport_width, 500.0);
        assert_eq!(args.select.as_deref(), Some("backend"));
        assert!(args.no_animation);
        assert_eq!(args.dump_layout, Some(PathBuf::from("layout.json")));
    }

    #[test]
    fn defaults_to_desktop_svg() {
        let args = Args::try_parse_from(["skradar"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert_eq!(args.viewport_width, 1280.0);
        assert!(!args.no_animation);
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("radar.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
