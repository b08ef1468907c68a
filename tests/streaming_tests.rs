//! Integration tests for chunk streaming: desired-set computation,
//! generation queue draining, activation by distance, and collision
//! proximity.

use cgmath::{Point2, Point3};
use voxel_terrain::{World, WorldConfig};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_world(render_distance: i32) -> World {
    World::new(WorldConfig {
        seed: Some(42),
        render_distance,
        ..WorldConfig::default()
    })
}

/// Ticks with a large delta until the generation queue is empty.
fn drain(world: &mut World, position: Point3<f32>) {
    for _ in 0..512 {
        world.tick(1.0, position);
        if world.queued_count() == 0 {
            break;
        }
    }
    assert_eq!(world.queued_count(), 0, "queue failed to drain");
}

#[test]
fn first_update_requests_inclusive_square() {
    init_logs();
    let mut world = test_world(2);
    let origin = Point3::new(0.5, 80.0, 0.5);

    world.tick(0.0, origin);
    // Render distance 2 around chunk (0, 0): the 5x5 inclusive square.
    assert_eq!(world.queued_count(), 25);

    drain(&mut world, origin);
    assert_eq!(world.chunk_count(), 25);
    for x in -2..=2 {
        for z in -2..=2 {
            assert!(
                world.chunk_at(Point2::new(x, z)).is_some(),
                "missing chunk ({x}, {z})"
            );
            assert!(world.is_active(Point2::new(x, z)));
        }
    }
    assert!(world.chunk_at(Point2::new(3, 0)).is_none());
}

#[test]
fn identical_position_updates_do_not_requeue() {
    let mut world = test_world(1);
    let origin = Point3::new(8.0, 80.0, 8.0);

    world.tick(0.0, origin);
    assert_eq!(world.queued_count(), 9);

    // Observer did not cross a chunk boundary: no new requests.
    world.tick(0.0, origin);
    assert_eq!(world.queued_count(), 9);

    drain(&mut world, origin);
    assert_eq!(world.chunk_count(), 9);
}

#[test]
fn duplicate_enqueues_generate_each_chunk_once() {
    let mut world = test_world(1);
    let origin = Point3::new(8.0, 80.0, 8.0);
    let east = Point3::new(24.0, 80.0, 8.0); // chunk (1, 0)

    // Bounce between two adjacent chunk coordinates before anything has
    // been generated; the overlapping desired squares enqueue several
    // coordinates more than once.
    world.tick(0.0, origin);
    world.tick(0.0, east);
    world.tick(0.0, origin);
    assert!(world.queued_count() > 9);

    drain(&mut world, origin);

    // Every coordinate in the final desired set exists exactly once, and
    // queued coordinates that fell out of range (the x = 2 column from
    // the eastern square) were dropped instead of generated.
    assert_eq!(world.chunk_count(), 9);
    for x in -1..=1 {
        for z in -1..=1 {
            assert!(world.chunk_at(Point2::new(x, z)).is_some());
        }
    }
    for z in -1..=1 {
        assert!(world.chunk_at(Point2::new(2, z)).is_none());
    }
}

#[test]
fn out_of_range_chunks_deactivate_but_are_retained() {
    let mut world = test_world(1);
    let origin = Point3::new(8.0, 80.0, 8.0);
    drain(&mut world, origin);
    assert!(world.is_active(Point2::new(0, 0)));

    // Move far away; the old neighborhood leaves the render distance.
    let far = Point3::new(10.0 * 16.0 + 8.0, 80.0, 10.0 * 16.0 + 8.0);
    world.tick(0.0, far);

    for x in -1..=1 {
        for z in -1..=1 {
            let coordinate = Point2::new(x, z);
            assert!(!world.is_active(coordinate), "({x}, {z}) still active");
            assert!(
                world.chunk_at(coordinate).is_some(),
                "({x}, {z}) was destroyed"
            );
        }
    }
}

#[test]
fn generation_is_rate_limited_per_tick() {
    let mut world = test_world(2);
    let origin = Point3::new(0.5, 80.0, 0.5);

    world.tick(0.0, origin);
    let queued = world.queued_count();

    // One due interval elapses; exactly one chunk may generate.
    world.tick(1.0, origin);
    assert_eq!(world.chunk_count(), 1);
    assert_eq!(world.queued_count(), queued - 1);

    // A tick with no elapsed time generates nothing.
    world.tick(0.0, origin);
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn collision_follows_observer_proximity() {
    let mut world = test_world(2);
    let origin = Point3::new(8.0, 80.0, 8.0);
    drain(&mut world, origin);

    // Chebyshev distance <= 1 around the observer chunk keeps collision.
    for x in -1..=1 {
        for z in -1..=1 {
            let entry = world.chunk_at(Point2::new(x, z)).unwrap();
            assert!(entry.collider_enabled, "({x}, {z}) should collide");
        }
    }
    let entry = world.chunk_at(Point2::new(2, 0)).unwrap();
    assert!(!entry.collider_enabled);
    assert!(entry.active);
}

#[test]
fn external_collision_toggles_are_idempotent() {
    let mut world = test_world(1);
    let origin = Point3::new(8.0, 80.0, 8.0);
    drain(&mut world, origin);

    let coordinate = Point2::new(1, 1);
    world.deactivate_collision(coordinate);
    world.deactivate_collision(coordinate);
    assert!(!world.chunk_at(coordinate).unwrap().collider_enabled);
    world.activate_collision(coordinate);
    world.activate_collision(coordinate);
    assert!(world.chunk_at(coordinate).unwrap().collider_enabled);

    // Unknown coordinates are a no-op, not a panic.
    world.activate_collision(Point2::new(99, 99));
    world.deactivate_collision(Point2::new(99, 99));
}

#[test]
fn active_meshes_skips_inactive_chunks() {
    let mut world = test_world(1);
    let origin = Point3::new(8.0, 80.0, 8.0);
    drain(&mut world, origin);
    assert_eq!(world.active_meshes().count(), 9);

    let far = Point3::new(20.0 * 16.0, 80.0, 0.0);
    world.tick(0.0, far);
    // The old 3x3 neighborhood is inactive; nothing new generated yet.
    assert_eq!(world.active_meshes().count(), 0);
}

#[test]
fn eviction_reclaims_and_allows_regeneration() {
    let mut world = test_world(1);
    let origin = Point3::new(8.0, 80.0, 8.0);
    drain(&mut world, origin);

    assert!(world.evict(Point2::new(0, 0)));
    assert!(!world.evict(Point2::new(0, 0)));
    assert!(world.chunk_at(Point2::new(0, 0)).is_none());
    assert_eq!(world.chunk_count(), 8);

    // Crossing back into a new chunk coordinate re-requests the evicted
    // one; it regenerates from the same seed.
    world.tick(0.0, Point3::new(24.0, 80.0, 8.0));
    world.tick(0.0, origin);
    drain(&mut world, origin);
    assert!(world.chunk_at(Point2::new(0, 0)).is_some());
}
