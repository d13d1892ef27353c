//! Integration tests for label synchronization against a live world.

use lumen_core::{Component, CoreError, EntityId, System, Systems, World, Worlds};
use lumen_inspect::{
    DebugNaming, LabelLog, LabelMode, LabelNotice, LabelSynchronizer, NullObserver, SyncConfig,
    WorldDebugSystem,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

struct Position;
impl Component for Position {}

struct Velocity;
impl Component for Velocity {}

struct Sprite;
impl Component for Sprite {}

/// Spawns entities until one lands on `index`, despawning the others.
fn spawn_at(world: &mut World, index: u32) -> EntityId {
    let mut spare = Vec::new();
    loop {
        let id = world.spawn();
        if id.index() == index {
            for other in spare {
                world.despawn(other);
            }
            return id;
        }
        spare.push(id);
    }
}

#[test]
fn test_entity_lifecycle_scenario() {
    let mut world = World::new(16);
    let log = LabelLog::shared();
    let sync = LabelSynchronizer::attach(&mut world, SyncConfig::baked(), log.clone()).unwrap();

    let entity = spawn_at(&mut world, 5);
    world.add(entity, Position).unwrap();
    sync.lock().tick(&world);
    assert_eq!(sync.lock().label(entity), Some("00000005:Position"));

    world.despawn(entity);
    sync.lock().tick(&world);
    {
        let guard = sync.lock();
        let entry = guard.entry(5).unwrap();
        assert!(!entry.is_active());
        assert_eq!(entry.text(), "00000005:Position");
    }

    // Freed indices are reused most-recent first
    let reborn = world.spawn();
    assert_eq!(reborn.index(), 5);
    assert_eq!(reborn.generation(), entity.generation() + 1);
    world.add(reborn, Velocity).unwrap();
    log.lock().drain();
    sync.lock().tick(&world);

    assert_eq!(sync.lock().label(reborn), Some("00000005:Velocity"));
    assert!(sync.lock().label(entity).is_none());
    assert_eq!(
        log.lock().drain(),
        vec![LabelNotice::Changed(reborn, "00000005:Velocity".into())]
    );
}

#[test]
fn test_many_changes_recompute_once() {
    let mut world = World::new(8);
    let log = LabelLog::shared();
    let sync = LabelSynchronizer::attach(&mut world, SyncConfig::baked(), log.clone()).unwrap();

    let entity = world.spawn();
    world.add(entity, Position).unwrap();
    world.add(entity, Velocity).unwrap();
    world.add(entity, Sprite).unwrap();
    world.remove::<Velocity>(entity);

    let stats = sync.lock().tick(&world);

    assert_eq!(stats.entries_flushed, 1);
    assert_eq!(
        log.lock().drain_changes(),
        vec![(entity, "00000000:Position:Sprite".to_owned())]
    );
}

#[test]
fn test_components_listed_in_registration_order() {
    let mut world = World::new(8);
    world.register::<Sprite>();
    let sync = LabelSynchronizer::attach(&mut world, SyncConfig::baked(), NullObserver).unwrap();

    let entity = world.spawn();
    world.add(entity, Position).unwrap();
    world.add(entity, Sprite).unwrap();
    sync.lock().tick(&world);

    assert_eq!(sync.lock().label(entity), Some("00000000:Sprite:Position"));
}

#[test]
fn test_explicit_mode_follows_debug_names() {
    let mut worlds = Worlds::new(World::new(4));
    worlds.insert("ui", World::named("ui", 4));
    let log = LabelLog::shared();
    let sync = LabelSynchronizer::initialize(
        &mut worlds,
        SyncConfig::explicit().with_world("ui"),
        log.clone(),
    )
    .unwrap();
    assert_eq!(sync.lock().mode(), LabelMode::Explicit);
    assert_eq!(sync.lock().world_label(), "[ECS-WORLD ui]");

    let world = worlds.get_mut(Some("ui")).unwrap();
    let button = world.spawn_named("OK button");
    let plain = world.spawn();
    world.add(plain, Position).unwrap();
    sync.lock().tick(world);

    assert_eq!(sync.lock().label(button), Some("OK button"));
    assert_eq!(sync.lock().label(plain), Some(""));

    world.set_debug_name(button, "Cancel button").unwrap();
    world.set_debug_name(plain, "Backdrop").unwrap();
    log.lock().drain();
    sync.lock().tick(world);

    let mut changes = log.lock().drain_changes();
    changes.sort_by_key(|(id, _)| id.index());
    assert_eq!(
        changes,
        vec![
            (button, "Cancel button".to_owned()),
            (plain, "Backdrop".to_owned()),
        ]
    );
    // The default world is not observed
    worlds.default_world_mut().spawn_named("elsewhere");
    assert_eq!(sync.lock().labels().active_count(), 2);
}

#[test]
fn test_missing_world_fails_initialization() {
    let mut worlds = Worlds::new(World::new(4));
    let result =
        LabelSynchronizer::initialize(&mut worlds, SyncConfig::baked().with_world("gone"), NullObserver);
    assert!(matches!(result, Err(CoreError::WorldNotFound(name)) if name == "gone"));
    assert_eq!(worlds.default_world().listener_count(), 0);
}

#[test]
fn test_initialize_from_file() {
    let path = std::env::temp_dir().join(format!("lumen_inspect_{}.toml", std::process::id()));
    std::fs::write(&path, "mode = \"explicit\"\ninitial_capacity_hint = 64\n").unwrap();

    let mut worlds = Worlds::new(World::new(4));
    let sync = LabelSynchronizer::initialize_from_file(&mut worlds, &path, NullObserver).unwrap();
    std::fs::remove_file(&path).ok();

    let sync = sync.lock();
    assert_eq!(sync.mode(), LabelMode::Explicit);
    assert_eq!(sync.labels().len(), 64);
    assert_eq!(sync.world_label(), "[ECS-WORLD]");
}

#[test]
fn test_random_churn_keeps_table_sized() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1AB3_15);
    let mut world = World::new(2);
    let sync = LabelSynchronizer::attach(&mut world, SyncConfig::baked(), NullObserver).unwrap();
    let mut alive: Vec<EntityId> = Vec::new();
    let mut highest = 0;

    for step in 0..2_000 {
        if alive.is_empty() || rng.gen_bool(0.6) {
            let id = world.spawn();
            highest = highest.max(id.slot());
            if rng.gen_bool(0.5) {
                world.add(id, Position).unwrap();
            }
            alive.push(id);
        } else {
            let victim = alive.swap_remove(rng.gen_range(0..alive.len()));
            assert!(world.despawn(victim));
        }
        if step % 50 == 0 {
            sync.lock().tick(&world);
        }

        let guard = sync.lock();
        assert!(guard.labels().len() >= world.capacity());
        assert!(guard.labels().len() > highest);
    }

    sync.lock().tick(&world);
    let guard = sync.lock();
    assert_eq!(guard.labels().active_count(), world.alive_count());
    for id in &alive {
        let label = guard.label(*id).unwrap();
        let expected = if world.has::<Position>(*id) {
            format!("{:08X}:Position", id.index())
        } else {
            format!("{:08X}", id.index())
        };
        assert_eq!(label, expected);
    }
}

#[test]
fn test_world_teardown_through_systems() {
    let log = LabelLog::shared();
    let mut systems = Systems::new(Worlds::new(World::new(4)));
    let mut debug = WorldDebugSystem::new(SyncConfig::baked(), log.clone());
    debug.init(systems.worlds_mut()).unwrap();
    let sync = debug.synchronizer().cloned().unwrap();

    let entity = systems.worlds_mut().default_world_mut().spawn();
    debug.run(systems.worlds_mut());
    assert_eq!(debug.last_tick().labels_updated, 1);
    assert_eq!(sync.lock().label(entity), Some("00000000"));

    systems.worlds_mut().default_world_mut().destroy();
    assert!(sync.lock().is_released());
    debug.run(systems.worlds_mut());
    assert_eq!(debug.last_tick().entries_flushed, 0);
}
