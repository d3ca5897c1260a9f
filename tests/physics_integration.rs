//! Integration tests for the word-particle barrage
//!
//! Tests lifetimes, floor settling and wall bounces through the public
//! simulator and the owning atmosphere.

use kuuki::core::{Atmosphere, ParticleSimulator};
use kuuki::types::{
    AtmosphereConfig, ColorTag, ConversationalState, GlyphHandle, SpeakerSide, WordParticle,
    WordSpawnConfig, WordStyle,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

fn seeded() -> AtmosphereConfig {
    AtmosphereConfig {
        seed: Some(5),
        ..AtmosphereConfig::default()
    }
}

fn simulator() -> ParticleSimulator {
    ParticleSimulator::with_rng(&AtmosphereConfig::default(), StdRng::seed_from_u64(5))
}

#[test]
fn test_impact_word_lives_exactly_300_ticks() {
    let t0 = Instant::now();
    let mut atmo = Atmosphere::starting_at(seeded(), t0);
    atmo.hear_at("嘘だ", t0);

    // Same instant every tick: no silence spawns interfere
    for _ in 0..299 {
        atmo.tick_at(t0);
    }
    assert_eq!(atmo.particles().len(), 1);
    assert_eq!(atmo.particles().particles()[0].life, 1);

    atmo.tick_at(t0);
    assert!(atmo.particles().is_empty());
}

#[test]
fn test_dropped_word_settles_on_floor() {
    let mut sim = simulator();
    let floor = sim.floor();
    sim.push(WordParticle::new(
        "落ちる",
        (960.0, floor - 200.0),
        (0.0, 0.0),
        1.0,
        ColorTag::White.rgba(),
        5_000,
    ));

    let mut ticks = 0;
    while !sim.particles()[0].resting {
        sim.tick();
        ticks += 1;
        assert!(sim.particles()[0].y <= floor);
        assert!(ticks < 2_000, "never came to rest");
    }

    let p = &sim.particles()[0];
    assert_eq!(p.y, floor);
    assert_eq!(p.vy, 0.0);

    // Resting words stay put
    sim.tick();
    assert_eq!(sim.particles()[0].y, floor);
}

#[test]
fn test_wall_sends_word_back_inside() {
    let mut sim = simulator();
    sim.push(WordParticle::new(
        "壁",
        (60.0, 300.0),
        (-20.0, 0.0),
        1.0,
        ColorTag::White.rgba(),
        100,
    ));
    sim.tick();
    let p = &sim.particles()[0];
    assert!(p.vx > 0.0);
    assert!(p.x > 50.0);
}

#[test]
fn test_mixed_lives_expire_independently() {
    let mut sim = simulator();
    for life in [1, 5, 10] {
        sim.push(WordParticle::new("語", (500.0, 100.0), (0.0, 0.0), 1.0, ColorTag::White.rgba(), life));
    }
    sim.tick();
    assert_eq!(sim.len(), 2);
    for _ in 0..4 {
        sim.tick();
    }
    assert_eq!(sim.len(), 1);
    for _ in 0..5 {
        sim.tick();
    }
    assert!(sim.is_empty());
    assert_eq!(sim.spawned(), 3);
}

#[test]
fn test_glyph_travels_with_particle() {
    let mut sim = simulator();
    sim.spawn_text("文字", false, ConversationalState::Unknown, SpeakerSide::Left, 0.0);
    let previous = sim.particles_mut()[0].attach_glyph(GlyphHandle::new(9));
    assert!(previous.is_none());
    sim.tick();
    assert_eq!(sim.particles()[0].glyph().map(|g| g.id()), Some(9));
}

#[test]
fn test_frame_lists_every_live_particle() {
    let t0 = Instant::now();
    let mut atmo = Atmosphere::starting_at(seeded(), t0);
    atmo.hear_at("こんにちは", t0);
    atmo.hear_at("でも", t0);
    atmo.tick_at(t0);

    let frame = atmo.frame();
    assert_eq!(frame.tick, 1);
    let texts: Vec<&str> = frame.particles.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["こんにちは", "でも"]);
    assert_eq!(frame.particles[1].color, ColorTag::Yellow.rgba());
}

#[test]
fn test_impact_spawn_without_color_is_red() {
    let mut sim = simulator();
    let cfg = WordSpawnConfig::new("衝撃").with_style(WordStyle::Impact);
    sim.spawn(&cfg, ConversationalState::Unknown, SpeakerSide::Left, 0.0);
    assert_eq!(sim.particles()[0].color, ColorTag::Red.rgba());
}

#[test]
fn test_zero_width_screen_survives_silence() {
    let t0 = Instant::now();
    let config = AtmosphereConfig {
        width: 0.0,
        ..seeded()
    };
    let mut atmo = Atmosphere::starting_at(config, t0);
    for secs in [2.1, 5.1, 8.1, 12.1, 17.2] {
        atmo.tick_at(t0 + Duration::from_secs_f64(secs));
    }
    assert_eq!(atmo.silence().stage(), 4);
    assert_eq!(atmo.particles().len(), 5);
}
