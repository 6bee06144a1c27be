// Burst sizing, batch-scoped cleanup and unmount behaviour of the celebration emitter.

use glam::Vec2;
use invite_core::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn celebration(width: f64, height: f64) -> (Rc<ManualScheduler>, Rc<FixedViewport>, Celebration) {
    let sched = Rc::new(ManualScheduler::new(0));
    let viewport = Rc::new(FixedViewport::new(width, height));
    let c = Celebration::new(
        ParticleEmitter::new(42),
        sched.clone(),
        sched.clone(),
        viewport.clone(),
    );
    (sched, viewport, c)
}

#[test]
fn pop_spawns_full_batch_near_pointer() {
    let mut e = ParticleEmitter::new(1);
    let burst = e.spawn_pop(Vec2::new(200.0, 300.0), 0);
    assert_eq!(e.len(), 24);
    assert_eq!(burst.lifetime, Duration::from_millis(1000));
    for p in e.active() {
        assert_eq!(p.batch, burst.batch);
        assert_eq!(p.style, AnimationStyle::Pop);
        assert!((p.position.x - 200.0).abs() <= 20.0);
        assert!((p.position.y - 300.0).abs() <= 20.0);
        assert!((10.0..20.0).contains(&p.size));
    }
}

#[test]
fn rise_count_follows_viewport_width() {
    let mut e = ParticleEmitter::new(2);
    e.spawn_rise(ViewportSize::new(500.0, 800.0), 0);
    assert_eq!(e.len(), 15);
    e.clear();
    e.spawn_rise(ViewportSize::new(1200.0, 800.0), 0);
    assert_eq!(e.len(), 30);
    e.clear();
    e.spawn_rise(ViewportSize::new(768.0, 800.0), 0);
    assert_eq!(e.len(), 30);
}

#[test]
fn rise_starts_below_bottom_with_rise_palette() {
    let mut e = ParticleEmitter::new(3);
    e.spawn_rise(ViewportSize::new(1000.0, 700.0), 0);
    for p in e.active() {
        assert!(p.position.y >= 700.0);
        assert!((0.0..1000.0).contains(&p.position.x));
        assert!(RISE_PALETTE.contains(&p.color));
        assert_eq!(p.style, AnimationStyle::FloatUp);
    }
}

#[test]
fn same_seed_same_particles() {
    let mut a = ParticleEmitter::new(9);
    let mut b = ParticleEmitter::new(9);
    a.spawn_pop(Vec2::new(10.0, 10.0), 5);
    b.spawn_pop(Vec2::new(10.0, 10.0), 5);
    assert_eq!(a.active(), b.active());
}

#[test]
fn retiring_one_batch_leaves_the_others() {
    let mut e = ParticleEmitter::new(4);
    let first = e.spawn_pop(Vec2::ZERO, 0).batch;
    let second = e.spawn_pop(Vec2::ZERO, 10).batch;
    assert_eq!(e.len(), 48);
    assert_eq!(e.retire(first), 24);
    assert!(e.active().iter().all(|p| p.batch == second));
    assert_eq!(e.retire(first), 0);
}

#[test]
fn pop_batch_is_gone_after_its_lifetime() {
    let (sched, _vp, c) = celebration(1024.0, 768.0);
    c.trigger_pop(50.0, 50.0);
    assert_eq!(c.active_count(), 24);
    sched.advance(Duration::from_millis(999));
    assert_eq!(c.active_count(), 24);
    sched.advance(Duration::from_millis(1));
    assert_eq!(c.active_count(), 0);
    assert_eq!(c.pending_cleanups(), 0);
}

#[test]
fn overlapping_bursts_clean_up_independently() {
    let (sched, _vp, c) = celebration(1024.0, 768.0);
    let rise = c.trigger_rise();
    sched.advance(Duration::from_millis(500));
    let pop = c.trigger_pop(10.0, 10.0);
    assert_eq!(c.active_count(), 30 + 24);

    // pop expires at 1500ms, rise at 3000ms
    sched.advance(Duration::from_millis(1000));
    let live = c.particles();
    assert_eq!(live.len(), 30);
    assert!(live.iter().all(|p| p.batch == rise));
    assert!(live.iter().all(|p| p.batch != pop));

    sched.advance(Duration::from_millis(1500));
    assert_eq!(c.active_count(), 0);
}

#[test]
fn rise_reads_viewport_at_trigger_time() {
    let (_sched, vp, c) = celebration(1200.0, 800.0);
    vp.resize(400.0, 800.0);
    c.trigger_rise();
    assert_eq!(c.active_count(), 15);
}

#[test]
fn changes_publish_on_spawn_and_retire() {
    let (sched, _vp, c) = celebration(1024.0, 768.0);
    let counts = Rc::new(Cell::new(Vec::new()));
    let seen = counts.clone();
    let _sub = c.changes().subscribe(move |snap: &Vec<Particle>| {
        let mut v = seen.take();
        v.push(snap.len());
        seen.set(v);
    });
    c.trigger_pop(0.0, 0.0);
    sched.advance(Duration::from_millis(1000));
    assert_eq!(counts.take(), vec![24, 0]);
}

#[test]
fn unmount_cancels_pending_cleanups() {
    let (sched, _vp, c) = celebration(1024.0, 768.0);
    c.trigger_pop(0.0, 0.0);
    c.trigger_rise();
    assert_eq!(sched.pending(), 2);
    c.unmount();
    assert_eq!(sched.pending(), 0);
    assert_eq!(c.active_count(), 0);
}
