//! Render settings.

use crate::{RenderError, RenderResult};
use lumen_math::is_zero;
use serde::{Deserialize, Serialize};
use std::thread;

/// Default recursion budget for secondary rays.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Contributions whose accumulated weight falls below this are dropped.
pub const DEFAULT_MIN_CONTRIBUTION: f64 = 0.001;

/// Default number of extra shadow rays per light when soft shadows are on.
pub const DEFAULT_SOFT_SHADOW_RAYS: u32 = 50;

/// Default radius of the disk soft-shadow rays are aimed through.
pub const DEFAULT_SOFT_SHADOW_RADIUS: f64 = 0.05;

/// Cores left free when the thread count is auto-detected.
pub const SPARE_THREADS: usize = 2;

/// Soft shadow sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftShadows {
    pub enabled: bool,
    /// Extra rays on top of the hard-shadow ray
    pub rays: u32,
    /// Disk radius, one unit along the light direction
    pub radius: f64,
}

impl SoftShadows {
    /// True if soft shadows are enabled and would produce extra rays.
    pub fn is_active(&self) -> bool {
        self.enabled && self.rays > 0 && !is_zero(self.radius)
    }
}

impl Default for SoftShadows {
    fn default() -> Self {
        Self {
            enabled: false,
            rays: DEFAULT_SOFT_SHADOW_RAYS,
            radius: DEFAULT_SOFT_SHADOW_RADIUS,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Recursion budget; shading returns black once it is used up
    pub max_depth: u32,
    /// Minimum energy a light or secondary ray must carry to be traced
    pub min_contribution: f64,
    pub soft_shadows: SoftShadows,
    /// Fraction of the pixel covered by a super-sampling beam; 0 disables
    /// super-sampling
    pub supersampling_density: f64,
    /// Rays per pixel when super-sampling
    pub beam_rays: u32,
    /// Worker threads; 0 picks a count from the available cores
    pub threads: i32,
    /// Log progress percentages while rendering
    pub debug_print: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_contribution: DEFAULT_MIN_CONTRIBUTION,
            soft_shadows: SoftShadows::default(),
            supersampling_density: 0.0,
            beam_rays: 1,
            threads: 0,
            debug_print: false,
        }
    }
}

impl RenderSettings {
    /// Set the worker thread count. 0 picks a count from the available
    /// cores, leaving [`SPARE_THREADS`] free.
    pub fn with_threads(mut self, threads: i32) -> RenderResult<Self> {
        if threads < 0 {
            return Err(RenderError::InvalidThreadCount(threads));
        }
        self.threads = threads;
        Ok(self)
    }

    /// Set super-sampling density and the number of rays per pixel.
    /// Density must be finite and not negative; 0 turns super-sampling off.
    pub fn with_supersampling(mut self, density: f64, beam_rays: u32) -> RenderResult<Self> {
        check_density(density)?;
        self.supersampling_density = density;
        self.beam_rays = beam_rays;
        Ok(self)
    }

    /// Enable soft shadows with the given ray count and disk radius.
    pub fn with_soft_shadows(mut self, rays: u32, radius: f64) -> Self {
        self.soft_shadows = SoftShadows {
            enabled: true,
            rays,
            radius,
        };
        self
    }

    /// Set the recursion budget.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Turn on progress logging.
    pub fn with_debug_print(mut self) -> Self {
        self.debug_print = true;
        self
    }

    /// True if each pixel is shaded from a beam of rays.
    pub fn is_supersampling(&self) -> bool {
        self.supersampling_density != 0.0
    }

    /// Check values that may have bypassed the `with_*` setters, as
    /// deserialized settings do.
    pub fn validate(&self) -> RenderResult<()> {
        check_density(self.supersampling_density)?;
        self.worker_count().map(|_| ())
    }

    /// Resolve the number of worker threads to spawn.
    ///
    /// Validates `threads` again, since deserialized settings never went
    /// through [`RenderSettings::with_threads`].
    pub fn worker_count(&self) -> RenderResult<usize> {
        match self.threads {
            n if n < 0 => Err(RenderError::InvalidThreadCount(n)),
            0 => {
                let cores = thread::available_parallelism().map_or(1, |n| n.get());
                Ok(cores.saturating_sub(SPARE_THREADS).max(1))
            }
            n => Ok(n as usize),
        }
    }
}

fn check_density(density: f64) -> RenderResult<()> {
    if !density.is_finite() || density < 0.0 {
        return Err(RenderError::InvalidDensity(density));
    }
    Ok(())
}
