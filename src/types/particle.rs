//! Word particles

use serde::Serialize;
use crate::types::Rgba;

/// Opaque handle to a rasterized glyph.
///
/// Deliberately neither `Clone` nor `Copy`: a particle owns its glyph for
/// its whole life and the glyph dies with it.
#[derive(Debug, PartialEq, Eq)]
pub struct GlyphHandle(u64);

impl GlyphHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// One live word in the barrage
#[derive(Debug)]
pub struct WordParticle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub rotation: f64,
    pub angular_velocity: f64,
    pub scale: f64,
    pub scale_x: f64,
    pub color: Rgba,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
    pub resting: bool,
    pub filler: bool,
    pub glitch: bool,
    glyph: Option<GlyphHandle>,
}

impl WordParticle {
    /// New moving particle without a glyph
    pub fn new(
        text: impl Into<String>,
        (x, y): (f64, f64),
        (vx, vy): (f64, f64),
        scale: f64,
        color: Rgba,
        life: u32,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            vx,
            vy,
            rotation: 0.0,
            angular_velocity: 0.0,
            scale,
            scale_x: 1.0,
            color,
            life,
            max_life: life,
            resting: false,
            filler: false,
            glitch: false,
            glyph: None,
        }
    }

    /// Attach the rasterized glyph. Returns the previous one, if any.
    pub fn attach_glyph(&mut self, glyph: GlyphHandle) -> Option<GlyphHandle> {
        self.glyph.replace(glyph)
    }

    pub fn glyph(&self) -> Option<&GlyphHandle> {
        self.glyph.as_ref()
    }

    /// Fraction of life remaining, for fade-out
    pub fn life_fraction(&self) -> f64 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f64 / self.max_life as f64
        }
    }

    pub fn view(&self) -> ParticleView {
        ParticleView {
            text: self.text.clone(),
            x: self.x,
            y: self.y,
            rotation: self.rotation,
            scale: self.scale,
            scale_x: self.scale_x,
            color: self.color,
            alpha: self.life_fraction(),
            glitch: self.glitch,
        }
    }
}

/// Serializable snapshot of a particle for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub scale_x: f64,
    pub color: Rgba,
    pub alpha: f64,
    pub glitch: bool,
}
