use crate::constants::*;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientKind {
    Petal,
    Sparkle,
}

impl AmbientKind {
    pub fn glyph(self) -> &'static str {
        match self {
            AmbientKind::Petal => "🌸",
            AmbientKind::Sparkle => "✨",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            AmbientKind::Petal => "ambient-petal",
            AmbientKind::Sparkle => "ambient-sparkle",
        }
    }
}

/// A looping background particle; the animation itself is CSS
/// (`float-particle`), this only fixes its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientParticle {
    pub left_percent: f32,
    pub duration_s: f32,
    pub delay_s: f32,
    pub size_px: f32,
    pub kind: AmbientKind,
}

pub fn ambient_field<R: Rng>(rng: &mut R, count: usize) -> Vec<AmbientParticle> {
    (0..count)
        .map(|_| AmbientParticle {
            left_percent: rng.gen_range(0.0..100.0),
            duration_s: rng.gen_range(AMBIENT_DURATION_MIN_S..AMBIENT_DURATION_MAX_S),
            delay_s: rng.gen_range(0.0..AMBIENT_DELAY_MAX_S),
            size_px: rng.gen_range(AMBIENT_SIZE_MIN_PX..AMBIENT_SIZE_MAX_PX),
            kind: if rng.gen_bool(AMBIENT_PETAL_PROBABILITY) {
                AmbientKind::Petal
            } else {
                AmbientKind::Sparkle
            },
        })
        .collect()
}
