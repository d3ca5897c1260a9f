//! Particle simulator: the barrage of live word glyphs
//!
//! Spawning resolves a [`WordSpawnConfig`] into a particle: the style picks
//! base placement, velocity, color and life, then the config's explicit
//! overrides are layered on top, then SPLIT/glitch forcing. Each tick applies
//! gravity, friction, floor and wall bounces, and ages every particle by one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::{
    GRAVITY, FILLER_GRAVITY_SCALE, FRICTION, FLOOR_RESTITUTION, FLOOR_FRICTION,
    WALL_RESTITUTION, REST_SPEED, FILLER_MAX_CHARS,
};
use crate::types::{
    AtmosphereConfig, ColorTag, ConversationalState, Rgba, SpeakerSide, WordParticle,
    WordSpawnConfig, WordStyle,
};

// Lifetimes (ticks)
const LIFE_IMPACT: u32 = 300;
const LIFE_DOTS: u32 = 300;
const LIFE_MA: u32 = 800;
const LIFE_HEAVY: u32 = 1000;
const LIFE_ABYSS: u32 = 1200;
const LIFE_SPOKEN: u32 = 600;

/// Horizontal position of each speaker's band, as a fraction of width
const SIDE_BAND_LEFT: f64 = 0.2;
const SIDE_BAND_RIGHT: f64 = 0.8;

/// Base physics for one style, before config overrides
#[derive(Debug, Clone, Copy, PartialEq)]
struct StyleProfile {
    scale: f64,
    life: u32,
    position: (f64, f64),
    velocity: (f64, f64),
    angular_velocity: f64,
    color: Rgba,
}

/// What a spawn did to the ambient effects
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnEffects {
    /// Added to the shake accumulator
    pub shake: f64,
    /// Set the flash accumulator to 1.0
    pub flash: bool,
}

/// Owns the barrage and the random source used for jitter
#[derive(Debug)]
pub struct ParticleSimulator {
    particles: Vec<WordParticle>,
    width: f64,
    height: f64,
    floor: f64,
    wall_margin: f64,
    rng: StdRng,
    spawned: u64,
}

impl ParticleSimulator {
    /// Simulator for the given screen, seeded from config or entropy
    pub fn new(config: &AtmosphereConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Simulator with an explicit random source
    pub fn with_rng(config: &AtmosphereConfig, rng: StdRng) -> Self {
        // Jitter ranges are sampled from the screen size and must not be empty
        let width = usable_extent(config.width);
        let height = usable_extent(config.height);
        Self {
            particles: Vec::new(),
            width,
            height,
            floor: height - config.floor_margin,
            wall_margin: config.wall_margin,
            rng,
            spawned: 0,
        }
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> &[WordParticle] {
        &self.particles
    }

    /// Mutable access for the renderer to attach glyphs
    pub fn particles_mut(&mut self) -> &mut [WordParticle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total particles ever spawned
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Insert a prebuilt particle
    pub fn push(&mut self, particle: WordParticle) {
        self.particles.push(particle);
        self.spawned += 1;
    }

    /// Spawn a word from a resolved config
    pub fn spawn(
        &mut self,
        config: &WordSpawnConfig,
        state: ConversationalState,
        side: SpeakerSide,
        mic_volume: f64,
    ) -> SpawnEffects {
        let nuance = (1.0 + mic_volume * 3.0).clamp(1.0, 4.0);
        let voiced_scale = nuance + self.rng.gen_range(0.0..0.5);
        let profile = self.profile(config.style, voiced_scale, state, side);

        let mut particle = WordParticle::new(
            config.text.clone(),
            profile.position,
            profile.velocity,
            profile.scale,
            profile.color,
            profile.life,
        );
        particle.angular_velocity = profile.angular_velocity;

        // Overrides, in order
        particle.rotation = config.rotation;
        particle.scale_x = config.scale_x;
        if let Some(vy) = config.vy {
            particle.vy = vy;
        }
        particle.vy *= config.vy_mult;
        if let Some(scale) = config.scale {
            particle.scale = scale;
        }
        if let Some(color) = config.color {
            particle.color = color.rgba();
        }

        particle.glitch = config.style == WordStyle::Glitch;
        if state.is_split() || particle.glitch {
            particle.color = ColorTag::Red.rgba();
            particle.vx *= 2.0;
            particle.vy *= 2.0;
        }

        particle.filler =
            config.text.chars().count() <= FILLER_MAX_CHARS && !config.style.is_silence();

        self.push(particle);

        SpawnEffects {
            shake: config.shake,
            flash: config.flash,
        }
    }

    /// Spawn plain text; `glitch` picks the glitch style, otherwise normal
    pub fn spawn_text(
        &mut self,
        text: &str,
        glitch: bool,
        state: ConversationalState,
        side: SpeakerSide,
        mic_volume: f64,
    ) -> SpawnEffects {
        let style = if glitch { WordStyle::Glitch } else { WordStyle::Normal };
        let config = WordSpawnConfig::new(text).with_style(style);
        self.spawn(&config, state, side, mic_volume)
    }

    /// Base physics per style
    fn profile(
        &mut self,
        style: WordStyle,
        voiced_scale: f64,
        state: ConversationalState,
        side: SpeakerSide,
    ) -> StyleProfile {
        let (w, h) = (self.width, self.height);
        match style {
            WordStyle::Impact | WordStyle::Glitch => StyleProfile {
                scale: voiced_scale * 1.5,
                life: LIFE_IMPACT,
                position: (
                    w / 2.0 + self.rng.gen_range(-w * 0.1..=w * 0.1),
                    h / 2.0 + self.rng.gen_range(-h * 0.1..=h * 0.1),
                ),
                velocity: (self.rng.gen_range(-10.0..=10.0), self.rng.gen_range(-10.0..=10.0)),
                angular_velocity: self.rng.gen_range(-0.1..=0.1),
                color: ColorTag::Red.rgba(),
            },
            WordStyle::SilenceDots => StyleProfile {
                scale: 1.0,
                life: LIFE_DOTS,
                position: (self.rng.gen_range(0.0..w), self.rng.gen_range(0.0..h)),
                velocity: (self.rng.gen_range(-0.5..=0.5), self.rng.gen_range(-0.5..=0.5)),
                angular_velocity: 0.0,
                color: ColorTag::GreyAlpha.rgba(),
            },
            WordStyle::SilenceMa => StyleProfile {
                scale: 3.0,
                life: LIFE_MA,
                position: (w / 2.0, h / 3.0),
                velocity: (0.0, 0.0),
                angular_velocity: 0.0,
                color: ColorTag::BlueWhite.rgba(),
            },
            WordStyle::SilenceHeavy => StyleProfile {
                scale: 5.0,
                life: LIFE_HEAVY,
                position: (self.rng.gen_range(0.0..w), -h * 0.1),
                velocity: (0.0, 15.0),
                angular_velocity: 0.0,
                color: ColorTag::DarkGrey.rgba(),
            },
            WordStyle::SilenceAbyss => StyleProfile {
                scale: 7.0,
                life: LIFE_ABYSS,
                position: (self.rng.gen_range(0.0..w), h * 1.1),
                velocity: (0.0, -1.0),
                angular_velocity: 0.0,
                color: ColorTag::Black.rgba(),
            },
            WordStyle::Normal
            | WordStyle::Conjunction
            | WordStyle::Hesitation
            | WordStyle::InvertV
            | WordStyle::InvertH
            | WordStyle::InvertC => {
                let speed = self.rng.gen_range(5.0..=10.0);
                let lift = self.rng.gen_range(5.0..=10.0);
                let (position, vx) = if state.is_split() {
                    // Erupt from the center in either direction
                    let dir = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    let x = w / 2.0 + self.rng.gen_range(-w * 0.05..=w * 0.05);
                    ((x, h / 2.0), dir * speed)
                } else {
                    let y = h * 0.7 + self.rng.gen_range(-h * 0.05..=h * 0.05);
                    match side {
                        SpeakerSide::Left => ((w * SIDE_BAND_LEFT, y), speed),
                        SpeakerSide::Right => ((w * SIDE_BAND_RIGHT, y), -speed),
                    }
                };
                StyleProfile {
                    scale: voiced_scale,
                    life: LIFE_SPOKEN,
                    position,
                    velocity: (vx, -lift),
                    angular_velocity: self.rng.gen_range(-0.05..=0.05),
                    color: ColorTag::White.rgba(),
                }
            }
        }
    }

    /// Advance every particle one step and drop the expired
    pub fn tick(&mut self) {
        let (floor, left, right) = (self.floor, self.wall_margin, self.width - self.wall_margin);
        for p in self.particles.iter_mut() {
            if !p.resting {
                integrate(p);
                collide_floor(p, floor);
                collide_walls(p, left, right);
            }
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    /// Drop every particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Screen extent clamped to at least one pixel
fn usable_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(1.0)
    } else {
        1.0
    }
}

/// Gravity, velocity, rotation and friction for one tick
fn integrate(p: &mut WordParticle) {
    let gravity = if p.filler { GRAVITY * FILLER_GRAVITY_SCALE } else { GRAVITY };
    p.vy += gravity;
    p.x += p.vx;
    p.y += p.vy;
    p.rotation += p.angular_velocity;
    p.vx *= FRICTION;
    p.angular_velocity *= FRICTION;
}

/// Bounce off the floor line; settle when the rebound is too weak
fn collide_floor(p: &mut WordParticle, floor: f64) {
    if p.y > floor {
        p.y = floor;
        p.vy *= FLOOR_RESTITUTION;
        p.vx *= FLOOR_FRICTION;
        if p.vy.abs() < REST_SPEED {
            p.resting = true;
            p.vy = 0.0;
        }
    }
}

/// Bounce off the side band with one extra step on the reflected velocity
fn collide_walls(p: &mut WordParticle, left: f64, right: f64) {
    if p.x < left || p.x > right {
        p.vx *= WALL_RESTITUTION;
        p.x += p.vx;
    }
}
