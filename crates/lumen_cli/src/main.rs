//! Lumen - render a demo scene to a PNG file.

mod scenes;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::Color;
use lumen_renderer::{print_grid, render, ImageBuffer, RenderConfig, SimpleRayTracer};

use crate::scenes::{Demo, DemoScene};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// the demo scene to render
    #[arg(value_enum, default_value_t = DemoScene::TwoSpheres)]
    scene: DemoScene,
    /// the path where the rendered image is saved as PNG
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
    /// image width in pixels
    #[arg(long, default_value_t = 500)]
    width: u32,
    /// image height in pixels
    #[arg(long, default_value_t = 500)]
    height: u32,
    /// JSON render config; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// worker threads (0 renders on the main thread)
    #[arg(short, long)]
    threads: Option<usize>,
    /// maximum reflection/refraction depth
    #[arg(long)]
    max_level: Option<u32>,
    /// skip the BVH and prune with per-geometry bounding boxes only
    #[arg(long)]
    no_bvh: bool,
    /// draw a white grid every N pixels over the image
    #[arg(long)]
    grid: Option<u32>,
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(max_level) = self.max_level {
            config.max_level = max_level;
        }
        if self.no_bvh {
            config.use_bvh = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = args.render_config()?;

    let Demo { mut scene, camera } = args.scene.build()?;
    log::info!(
        "Loaded scene '{}': {} geometries, {} lights",
        scene.name,
        scene.geometries.len(),
        scene.lights.len()
    );

    if config.use_bvh {
        scene.build_bvh();
    } else {
        scene.geometries.make_cbr();
    }

    let tracer = SimpleRayTracer::with_config(&scene, &config);
    let mut image = ImageBuffer::new(args.width, args.height);

    let start = Instant::now();
    render(&camera, &tracer, &mut image, &config)?;
    log::info!("Rendered in {:.2?}", start.elapsed());

    if let Some(interval) = args.grid {
        print_grid(&mut image, interval, Color::ONE);
    }

    let output = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("image buffer size does not match its dimensions")?;
    output
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
