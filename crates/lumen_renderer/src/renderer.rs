//! Image output and render dispatch.
//!
//! Casts one ray through the center of every pixel, either sequentially
//! on the calling thread or on a fresh pool of worker threads, and hands
//! the colors to a [`PixelSink`].

use lumen_core::Color;
use thiserror::Error;

use crate::pixel::{Pixel, PixelCursor};
use crate::{Camera, RayTracer, RenderConfig, TraceError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to trace pixel ({column}, {row}): {source}")]
    Pixel {
        column: u32,
        row: u32,
        source: TraceError,
    },

    #[error("Failed to start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Destination for rendered pixels on a fixed grid.
pub trait PixelSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn write_pixel(&mut self, column: u32, row: u32, color: Color);
}

/// Clamp a value to [0, 1].
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to RGBA bytes.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f64| (clamp_01(c) * 255.0).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

impl PixelSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_pixel(&mut self, column: u32, row: u32, color: Color) {
        self.set(column, row, color);
    }
}

/// Overwrite every `interval`-th row and column with `color`.
pub fn print_grid(sink: &mut dyn PixelSink, interval: u32, color: Color) {
    let interval = interval.max(1);
    for column in 0..sink.width() {
        for row in 0..sink.height() {
            if column % interval == 0 || row % interval == 0 {
                sink.write_pixel(column, row, color);
            }
        }
    }
}

/// Outcome of tracing a single pixel.
type PixelResult = (Pixel, Result<Color, TraceError>);

fn cast_ray(camera: &Camera, tracer: &dyn RayTracer, nx: u32, ny: u32, pixel: Pixel) -> Result<Color, TraceError> {
    let ray = camera.construct_ray(nx, ny, pixel.column, pixel.row)?;
    tracer.trace_ray(&ray)
}

/// Render every pixel of `sink` through `camera`.
///
/// With `config.threads == 0` pixels are traced in row-major order on the
/// calling thread. Otherwise a pool of that many workers is created for
/// this call; each worker claims pixels from a shared cursor and keeps its
/// results until all workers have joined, then the results are written.
///
/// A pixel whose trace fails is logged and left unwritten; the first such
/// failure in row-major order is returned once every other pixel is done.
pub fn render(
    camera: &Camera,
    tracer: &dyn RayTracer,
    sink: &mut dyn PixelSink,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let (nx, ny) = (sink.width(), sink.height());
    let cursor = PixelCursor::new(nx, ny, config.progress_step);

    log::info!(
        "Rendering {}x{} with {} thread(s)",
        nx,
        ny,
        config.threads.max(1)
    );

    let results: Vec<PixelResult> = if config.threads == 0 {
        std::iter::from_fn(|| cursor.next_pixel())
            .map(|pixel| (pixel, cast_ray(camera, tracer, nx, ny, pixel)))
            .collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("lumen-render-{i}"))
            .build()?;

        let batches: Vec<Vec<PixelResult>> = pool.broadcast(|_| {
            std::iter::from_fn(|| cursor.next_pixel())
                .map(|pixel| (pixel, cast_ray(camera, tracer, nx, ny, pixel)))
                .collect()
        });
        batches.into_iter().flatten().collect()
    };

    let mut first_failure: Option<(usize, RenderError)> = None;
    for (pixel, result) in results {
        match result {
            Ok(color) => sink.write_pixel(pixel.column, pixel.row, color),
            Err(source) => {
                log::error!(
                    "Failed to trace pixel ({}, {}): {}",
                    pixel.column,
                    pixel.row,
                    source
                );
                let index = pixel.index(nx);
                let is_first = match &first_failure {
                    Some((first, _)) => index < *first,
                    None => true,
                };
                if is_first {
                    first_failure = Some((
                        index,
                        RenderError::Pixel {
                            column: pixel.column,
                            row: pixel.row,
                            source,
                        },
                    ));
                }
            }
        }
    }

    match first_failure {
        Some((_, err)) => Err(err),
        None => {
            log::info!("Render complete: {} pixels", cursor.total());
            Ok(())
        }
    }
}
