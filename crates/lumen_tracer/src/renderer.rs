//! Render driver and output image buffer.

use crate::{
    Color, Pixel, PixelDistributor, RayTracer, RenderError, RenderResult, RenderSettings, Scene,
};
use rand::RngCore;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
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

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (col, row).
    pub fn get(&self, col: u32, row: u32) -> Color {
        self.pixels[self.index(col, row)]
    }

    /// Set the pixel at (col, row).
    pub fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        let i = self.index(col, row);
        self.pixels[i] = color;
    }

    /// Paint every row and column whose index is a multiple of `interval`.
    pub fn draw_grid(&mut self, interval: u32, color: Color) {
        if interval == 0 {
            return;
        }
        for row in 0..self.height {
            for col in 0..self.width {
                if row % interval == 0 || col % interval == 0 {
                    self.write_pixel(col, row, color);
                }
            }
        }
    }

    /// Convert to RGBA bytes, clamping each channel to the displayable range.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode and write the image. The format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Renders a scene into an [`ImageBuffer`] on a pool of worker threads.
///
/// Workers pull pixels from a shared [`PixelDistributor`], shade them and
/// send the result back over a channel. The calling thread is the only
/// writer of the image.
pub struct Renderer<'a> {
    scene: &'a Scene,
    settings: RenderSettings,
}

impl<'a> Renderer<'a> {
    pub fn new(scene: &'a Scene, settings: RenderSettings) -> Self {
        Self { scene, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render every pixel of `image`.
    ///
    /// Returns [`RenderError::WorkerPanicked`] if any worker thread
    /// panicked; pixels it had claimed are left untouched.
    pub fn render(&self, image: &mut ImageBuffer) -> RenderResult<()> {
        self.settings.validate()?;
        let workers = self.settings.worker_count()?;
        let (nx, ny) = (image.width, image.height);
        let distributor = PixelDistributor::new(ny, nx, self.settings.debug_print);
        let tracer = RayTracer::new(self.scene, &self.settings);
        let ambient = self.scene.ambient.intensity();

        log::info!(
            "Rendering '{}' at {}x{} on {} thread(s), {}",
            self.scene.name,
            nx,
            ny,
            workers,
            if self.settings.is_supersampling() {
                format!(
                    "{} rays per pixel at density {}",
                    self.settings.beam_rays, self.settings.supersampling_density
                )
            } else {
                "one ray per pixel".to_string()
            }
        );
        let start = Instant::now();

        let (tx, rx) = mpsc::channel::<(Pixel, Color)>();
        let panicked = thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let tx = tx.clone();
                    let distributor = &distributor;
                    let tracer = &tracer;
                    s.spawn(move || {
                        let mut rng = rand::thread_rng();
                        while let Some(pixel) = distributor.next_pixel() {
                            let color = self.pixel_color(tracer, nx, ny, pixel, &mut rng) + ambient;
                            if tx.send((pixel, color)).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            drop(tx);

            for (pixel, color) in rx {
                image.write_pixel(pixel.col, pixel.row, color);
            }

            handles.into_iter().map(|h| h.join()).filter(Result::is_err).count()
        });

        if panicked > 0 {
            log::error!("{} of {} render worker(s) panicked", panicked, workers);
            return Err(RenderError::WorkerPanicked(panicked));
        }

        if self.settings.debug_print && distributor.percent() < 100 {
            log::info!("render progress: 100%");
        }
        log::info!("Render complete in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Color of one pixel before ambient light is added.
    ///
    /// With super-sampling the beam's colors are averaged; rays that miss
    /// contribute the background.
    fn pixel_color(
        &self,
        tracer: &RayTracer,
        nx: u32,
        ny: u32,
        pixel: Pixel,
        rng: &mut dyn RngCore,
    ) -> Color {
        let camera = &self.scene.camera;
        let plane = &self.scene.view_plane;

        if !self.settings.is_supersampling() {
            return tracer.trace(&camera.construct_ray(plane, nx, ny, pixel.col, pixel.row));
        }

        let beam = camera.construct_ray_beam(
            plane,
            nx,
            ny,
            pixel.col,
            pixel.row,
            self.settings.supersampling_density,
            self.settings.beam_rays,
            rng,
        );
        let sum: Color = beam.iter().map(|ray| tracer.trace(ray)).sum();
        sum / beam.len() as f64
    }
}
