use anyhow::{Context, Result};
use clap::Parser;
use lumen_math::DVec3;
use lumen_tracer::{
    AmbientLight, Camera, Color, DirectionalLight, ImageBuffer, Material, Plane, PointLight,
    RenderSettings, Renderer, Scene, Sphere, SpotLight, ViewPlane,
};
use std::path::PathBuf;

/// Command line options.
#[derive(Parser, Debug)]
#[command(author, version, about = "Render the Lumen demo scene", long_about = None)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Output image; the format follows the extension
    #[arg(short, long, value_name = "FILE", default_value = "lumen.png")]
    output: PathBuf,

    /// JSON file with render settings; flags below override it
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Worker threads, 0 picks a count from the available cores
    #[arg(short = 't', long, value_name = "NUM", allow_negative_numbers = true)]
    threads: Option<i32>,

    /// Super-sampling density, 0 disables super-sampling
    #[arg(long, value_name = "FLOAT")]
    density: Option<f64>,

    /// Rays per pixel when super-sampling
    #[arg(long, value_name = "NUM")]
    beam_rays: Option<u32>,

    /// Extra shadow rays per light; enables soft shadows
    #[arg(long, value_name = "NUM")]
    soft_shadows: Option<u32>,

    /// Overlay a grid every NUM pixels
    #[arg(long, value_name = "NUM")]
    grid: Option<u32>,

    /// Log render progress
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Settings from the optional JSON file with command line overrides
    /// applied on top.
    fn render_settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parsing settings in {}", path.display()))?
            }
            None => RenderSettings::default(),
        };

        if let Some(threads) = self.threads {
            settings = settings.with_threads(threads)?;
        }
        if let Some(density) = self.density {
            let beam_rays = self.beam_rays.unwrap_or(settings.beam_rays);
            settings = settings.with_supersampling(density, beam_rays)?;
        } else if let Some(beam_rays) = self.beam_rays {
            settings.beam_rays = beam_rays;
        }
        if let Some(rays) = self.soft_shadows {
            let radius = settings.soft_shadows.radius;
            settings = settings.with_soft_shadows(rays, radius);
        }
        if self.debug {
            settings = settings.with_debug_print();
        }

        // Catch bad values coming from the file
        settings.validate()?;
        Ok(settings)
    }
}

/// Three spheres over a mirror floor, one of them glass, lit by a point,
/// a spot and a directional light.
fn demo_scene() -> Result<Scene> {
    let camera = Camera::new(DVec3::new(0.0, 0.0, 1000.0), DVec3::new(0.0, 0.0, -1.0), DVec3::Y)?;

    let scene = Scene::new("demo", camera, ViewPlane::new(1000.0, 200.0, 200.0))
        .with_background(Color::new(0.04, 0.05, 0.08))
        .with_ambient(AmbientLight::new(Color::new(1.0, 0.95, 0.9), 0.1))
        .with_geometry(
            Plane::new(DVec3::new(0.0, -50.0, 0.0), DVec3::Y)
                .with_emission(Color::splat(0.05))
                .with_material(Material::new().with_kd(0.4).with_ks(0.2).with_shininess(40).with_kr(0.35)),
        )
        .with_geometry(
            Sphere::new(DVec3::new(-55.0, -15.0, -100.0), 35.0)
                .with_emission(Color::new(0.3, 0.05, 0.05))
                .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100)),
        )
        .with_geometry(
            Sphere::new(DVec3::new(0.0, -20.0, 40.0), 30.0)
                .with_emission(Color::new(0.05, 0.1, 0.3))
                .with_material(Material::new().with_kd(0.2).with_ks(0.6).with_shininess(200).with_kt(0.6)),
        )
        .with_geometry(
            Sphere::new(DVec3::new(60.0, -25.0, -40.0), 25.0)
                .with_emission(Color::new(0.05, 0.25, 0.05))
                .with_material(Material::new().with_kd(0.6).with_ks(0.3).with_shininess(30).with_kr(0.2)),
        )
        .with_light(
            PointLight::new(Color::new(0.9, 0.8, 0.6), DVec3::new(-100.0, 120.0, 150.0))
                .with_attenuation(1.0, 0.0005, 0.000005),
        )
        .with_light(
            SpotLight::new(Color::new(0.6, 0.6, 0.9), DVec3::new(120.0, 100.0, 80.0), DVec3::new(-1.0, -1.0, -1.0))
                .with_attenuation(1.0, 0.0005, 0.000005),
        )
        .with_light(DirectionalLight::new(Color::splat(0.15), DVec3::new(0.5, -1.0, -0.5)));

    Ok(scene)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Lumen");

    let args = Args::parse();
    let settings = args.render_settings()?;
    let scene = demo_scene()?;

    let mut image = ImageBuffer::new(args.width, args.height);
    Renderer::new(&scene, settings).render(&mut image)?;

    if let Some(interval) = args.grid {
        image.draw_grid(interval, Color::ZERO);
    }

    image
        .save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
