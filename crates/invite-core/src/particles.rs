//! Celebration particle bursts.
//!
//! [`ParticleEmitter`] is the pure state: bursts are spawned with a seeded
//! RNG and retired by batch id. [`Celebration`] wires an emitter to a clock,
//! a scheduler and a viewport, retiring each burst after its lifetime.

use crate::constants::*;
use crate::geometry::ViewportSize;
use crate::platform::Viewport;
use crate::signal::Topic;
use crate::timer::{Clock, Scheduler, TimerHandle};
use fnv::FnvHashMap;
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleColor {
    Maroon,
    Goldenrod,
    Gold,
    HotPink,
    White,
}

impl ParticleColor {
    pub const ALL: [ParticleColor; 5] = [
        ParticleColor::Maroon,
        ParticleColor::Goldenrod,
        ParticleColor::Gold,
        ParticleColor::HotPink,
        ParticleColor::White,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            ParticleColor::Maroon => "#800000",
            ParticleColor::Goldenrod => "#B8860B",
            ParticleColor::Gold => "#FFD700",
            ParticleColor::HotPink => "#FF69B4",
            ParticleColor::White => "#FFFFFF",
        }
    }
}

pub const RISE_PALETTE: [ParticleColor; 3] = [
    ParticleColor::Maroon,
    ParticleColor::Gold,
    ParticleColor::HotPink,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Heart,
    Confetti,
}

impl ParticleKind {
    pub fn glyph(self) -> &'static str {
        match self {
            ParticleKind::Heart => "❤️",
            ParticleKind::Confetti => "✨",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStyle {
    Pop,
    FloatUp,
}

impl AnimationStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            AnimationStyle::Pop => "heart-particle",
            AnimationStyle::FloatUp => "rise-particle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub batch: BatchId,
    pub position: Vec2,
    pub color: ParticleColor,
    pub size: f32,
    pub kind: ParticleKind,
    pub style: AnimationStyle,
    pub spawn_ms: i64,
}

#[derive(Clone, Debug)]
pub struct PopConfig {
    pub count: usize,
    pub jitter_px: f32,
    pub size_px: (f32, f32),
    pub heart_probability: f64,
    pub lifetime: Duration,
}

impl Default for PopConfig {
    fn default() -> Self {
        Self {
            count: POP_BATCH_SIZE,
            jitter_px: POP_JITTER_PX,
            size_px: (POP_SIZE_MIN_PX, POP_SIZE_MAX_PX),
            heart_probability: POP_HEART_PROBABILITY,
            lifetime: Duration::from_millis(POP_LIFETIME_MS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RiseConfig {
    pub count_narrow: usize,
    pub count_wide: usize,
    pub narrow_below_px: f64,
    pub size_px: (f32, f32),
    pub spawn_depth_px: f32,
    pub heart_probability: f64,
    pub palette: Vec<ParticleColor>,
    pub lifetime: Duration,
}

impl RiseConfig {
    pub fn count_for(&self, viewport_width: f64) -> usize {
        if viewport_width < self.narrow_below_px {
            self.count_narrow
        } else {
            self.count_wide
        }
    }
}

impl Default for RiseConfig {
    fn default() -> Self {
        Self {
            count_narrow: RISE_BATCH_NARROW,
            count_wide: RISE_BATCH_WIDE,
            narrow_below_px: RISE_NARROW_BREAKPOINT_PX,
            size_px: (RISE_SIZE_MIN_PX, RISE_SIZE_MAX_PX),
            spawn_depth_px: RISE_SPAWN_DEPTH_PX,
            heart_probability: RISE_HEART_PROBABILITY,
            palette: RISE_PALETTE.to_vec(),
            lifetime: Duration::from_millis(RISE_LIFETIME_MS),
        }
    }
}

/// A spawned batch and how long it should live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Burst {
    pub batch: BatchId,
    pub lifetime: Duration,
}

type BatchMembers = SmallVec<[ParticleId; 32]>;

pub struct ParticleEmitter {
    rng: StdRng,
    pop: PopConfig,
    rise: RiseConfig,
    next_particle: u64,
    next_batch: u64,
    active: Vec<Particle>,
    batches: FnvHashMap<BatchId, BatchMembers>,
}

impl ParticleEmitter {
    pub fn new(seed: u64) -> Self {
        Self::with_config(PopConfig::default(), RiseConfig::default(), seed)
    }

    pub fn with_config(pop: PopConfig, rise: RiseConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pop,
            rise,
            next_particle: 0,
            next_batch: 0,
            active: Vec::new(),
            batches: FnvHashMap::default(),
        }
    }

    pub fn pop_config(&self) -> &PopConfig {
        &self.pop
    }

    pub fn rise_config(&self) -> &RiseConfig {
        &self.rise
    }

    pub fn active(&self) -> &[Particle] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn batch_members(&self, batch: BatchId) -> Option<&[ParticleId]> {
        self.batches.get(&batch).map(|m| m.as_slice())
    }

    fn open_batch(&mut self) -> BatchId {
        let id = BatchId(self.next_batch);
        self.next_batch += 1;
        id
    }

    fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_particle);
        self.next_particle += 1;
        id
    }

    fn pick_kind(&mut self, heart_probability: f64) -> ParticleKind {
        if self.rng.gen_bool(heart_probability.clamp(0.0, 1.0)) {
            ParticleKind::Heart
        } else {
            ParticleKind::Confetti
        }
    }

    fn pick_size(&mut self, (lo, hi): (f32, f32)) -> f32 {
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Localised burst around a pointer position.
    pub fn spawn_pop(&mut self, at: Vec2, now_ms: i64) -> Burst {
        let batch = self.open_batch();
        let cfg = self.pop.clone();
        let mut members = BatchMembers::new();
        for _ in 0..cfg.count {
            let jitter = if cfg.jitter_px > 0.0 {
                Vec2::new(
                    self.rng.gen_range(-cfg.jitter_px..=cfg.jitter_px),
                    self.rng.gen_range(-cfg.jitter_px..=cfg.jitter_px),
                )
            } else {
                Vec2::ZERO
            };
            let color = ParticleColor::ALL[self.rng.gen_range(0..ParticleColor::ALL.len())];
            let size = self.pick_size(cfg.size_px);
            let kind = self.pick_kind(cfg.heart_probability);
            let id = self.next_id();
            members.push(id);
            self.active.push(Particle {
                id,
                batch,
                position: at + jitter,
                color,
                size,
                kind,
                style: AnimationStyle::Pop,
                spawn_ms: now_ms,
            });
        }
        self.batches.insert(batch, members);
        log::debug!(
            "[particles] pop {:?} at ({:.0},{:.0}) -> {} active",
            batch,
            at.x,
            at.y,
            self.active.len()
        );
        Burst {
            batch,
            lifetime: cfg.lifetime,
        }
    }

    /// Viewport-wide burst rising from below the bottom edge.
    pub fn spawn_rise(&mut self, viewport: ViewportSize, now_ms: i64) -> Burst {
        let batch = self.open_batch();
        let cfg = self.rise.clone();
        let count = cfg.count_for(viewport.width);
        let width = viewport.width.max(0.0) as f32;
        let bottom = viewport.height.max(0.0) as f32;
        let mut members = BatchMembers::new();
        for _ in 0..count {
            let x = if width > 0.0 {
                self.rng.gen_range(0.0..width)
            } else {
                0.0
            };
            let depth = if cfg.spawn_depth_px > 0.0 {
                self.rng.gen_range(0.0..cfg.spawn_depth_px)
            } else {
                0.0
            };
            let color = match cfg.palette.as_slice() {
                [] => ParticleColor::Maroon,
                palette => palette[self.rng.gen_range(0..palette.len())],
            };
            let size = self.pick_size(cfg.size_px);
            let kind = self.pick_kind(cfg.heart_probability);
            let id = self.next_id();
            members.push(id);
            self.active.push(Particle {
                id,
                batch,
                position: Vec2::new(x, bottom + depth),
                color,
                size,
                kind,
                style: AnimationStyle::FloatUp,
                spawn_ms: now_ms,
            });
        }
        self.batches.insert(batch, members);
        log::debug!(
            "[particles] rise {:?} x{} (viewport {:.0}px) -> {} active",
            batch,
            count,
            viewport.width,
            self.active.len()
        );
        Burst {
            batch,
            lifetime: cfg.lifetime,
        }
    }

    /// Remove exactly the members of `batch`; returns how many were removed.
    pub fn retire(&mut self, batch: BatchId) -> usize {
        let Some(members) = self.batches.remove(&batch) else {
            return 0;
        };
        let before = self.active.len();
        self.active.retain(|p| !members.contains(&p.id));
        let removed = before - self.active.len();
        log::debug!(
            "[particles] retired {:?} ({} removed, {} active)",
            batch,
            removed,
            self.active.len()
        );
        removed
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.batches.clear();
    }
}

/// Emitter plus the timers that retire its bursts.
pub struct Celebration {
    emitter: Rc<RefCell<ParticleEmitter>>,
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
    viewport: Rc<dyn Viewport>,
    cleanups: Rc<RefCell<FnvHashMap<BatchId, TimerHandle>>>,
    changes: Topic<Vec<Particle>>,
}

impl Celebration {
    pub fn new(
        emitter: ParticleEmitter,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
        viewport: Rc<dyn Viewport>,
    ) -> Self {
        Self {
            emitter: Rc::new(RefCell::new(emitter)),
            clock,
            scheduler,
            viewport,
            cleanups: Rc::new(RefCell::new(FnvHashMap::default())),
            changes: Topic::new(),
        }
    }

    pub fn trigger_pop(&self, x: f32, y: f32) -> BatchId {
        let now = self.clock.now_ms();
        let burst = self.emitter.borrow_mut().spawn_pop(Vec2::new(x, y), now);
        self.arm_cleanup(burst);
        burst.batch
    }

    pub fn trigger_rise(&self) -> BatchId {
        let now = self.clock.now_ms();
        let size = self.viewport.size();
        let burst = self.emitter.borrow_mut().spawn_rise(size, now);
        self.arm_cleanup(burst);
        burst.batch
    }

    fn arm_cleanup(&self, burst: Burst) {
        let emitter = self.emitter.clone();
        let cleanups = self.cleanups.clone();
        let changes = self.changes.clone();
        let batch = burst.batch;
        let handle = self.scheduler.set_timeout(
            burst.lifetime,
            Box::new(move || {
                cleanups.borrow_mut().remove(&batch);
                let snapshot = {
                    let mut e = emitter.borrow_mut();
                    e.retire(batch);
                    e.active().to_vec()
                };
                changes.publish(&snapshot);
            }),
        );
        self.cleanups.borrow_mut().insert(batch, handle);
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.emitter.borrow().active().to_vec();
        self.changes.publish(&snapshot);
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.emitter.borrow().active().to_vec()
    }

    pub fn active_count(&self) -> usize {
        self.emitter.borrow().len()
    }

    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.borrow().len()
    }

    /// Full snapshot of live particles after every spawn and retire.
    pub fn changes(&self) -> &Topic<Vec<Particle>> {
        &self.changes
    }

    /// Cancel outstanding cleanups and drop every live particle.
    pub fn unmount(&self) {
        let handles: Vec<TimerHandle> = self.cleanups.borrow_mut().drain().map(|(_, h)| h).collect();
        for h in handles {
            self.scheduler.cancel(h);
        }
        self.emitter.borrow_mut().clear();
    }
}

impl Drop for Celebration {
    fn drop(&mut self) {
        self.unmount();
    }
}
