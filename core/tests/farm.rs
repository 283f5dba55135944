//! Farm orchestration tests: egg spawning, harvest, feeding, disposal.

use coop_core::{
    chicken::Chicken,
    config::FarmConfig,
    economy::Economy,
    error::CoopError,
    event::FarmEvent,
    farm::{Farm, FeedOutcome, HarvestOutcome},
    math::Vec3,
    rng::{RngBank, RngSlot},
    types::{ChickenId, EggId},
};

fn farm_with(config: FarmConfig) -> Farm {
    Farm::new(config, 0x5EED).expect("valid config")
}

/// A chicken that lays on its first tick.
fn add_layer(farm: &mut Farm, position: Vec3) -> ChickenId {
    let id = farm.allocate_chicken_id();
    let mut rng = RngBank::new(7).for_slot(RngSlot::Flock);
    let chicken = Chicken::spawn(id, position, farm.now(), &farm.config().chicken, &mut rng)
        .with_next_egg_time(0.0);
    farm.insert_chicken(chicken).expect("fresh id");
    id
}

#[test]
fn build_spawns_configured_flock_inside_bounds() {
    let farm = Farm::build(FarmConfig::default(), 42).unwrap();
    assert_eq!(farm.chickens().len(), 5);
    assert_eq!(farm.live_count(), 5);
    for chicken in farm.chickens() {
        assert!(farm.bounds().contains(chicken.position()));
        assert_eq!(chicken.hunger(), 100.0);
    }
    assert!(farm.eggs().is_empty());
}

#[test]
fn lay_egg_signal_spawns_egg_at_chicken_position() {
    let mut farm = farm_with(FarmConfig::default_test());
    let hen = add_layer(&mut farm, Vec3::new(1.0, 0.0, -1.0));

    let events = farm.tick(0.1, 300.0);

    assert_eq!(farm.eggs().len(), 1);
    let egg = &farm.eggs()[0];
    assert_eq!(egg.position(), farm.chicken(hen).unwrap().position());
    assert!(events.iter().any(|e| matches!(
        e,
        FarmEvent::EggLaid { chicken_id, egg_id, .. } if *chicken_id == hen && *egg_id == egg.id()
    )));
}

#[test]
fn hatched_eggs_stay_in_play() {
    let mut config = FarmConfig::default_test();
    config.egg.hatch_delay_range = (0.5, 0.5);
    let mut farm = farm_with(config);
    add_layer(&mut farm, Vec3::ZERO);

    let mut hatch_events = 0;
    for _ in 0..10 {
        hatch_events += farm
            .tick(0.1, 300.0)
            .iter()
            .filter(|e| matches!(e, FarmEvent::EggHatched { .. }))
            .count();
    }

    assert_eq!(hatch_events, 1);
    assert_eq!(farm.eggs().len(), 1);
    assert!(farm.eggs()[0].is_hatched());
    assert_eq!(farm.hatched_count(), 1);
}

#[test]
fn harvest_credits_tier_reward_and_removes_egg() {
    for (golden_chance, expected) in [(1.0, 15), (0.0, 5)] {
        let mut config = FarmConfig::default_test();
        config.egg.golden_chance = golden_chance;
        let mut farm = farm_with(config);
        let mut economy = Economy::new(0, 300.0);
        add_layer(&mut farm, Vec3::ZERO);
        farm.tick(0.1, 300.0);

        let egg_id = farm.eggs()[0].id();
        let outcome = farm.harvest(egg_id, &mut economy);

        assert_eq!(
            outcome,
            HarvestOutcome::Harvested { egg_id, golden: golden_chance == 1.0, reward: expected }
        );
        assert_eq!(economy.money(), expected);
        assert!(farm.egg(egg_id).is_none());
        assert!(farm.eggs().iter().all(|e| e.id() != egg_id));
    }
}

#[test]
fn repeated_harvest_is_a_no_op() {
    let mut farm = farm_with(FarmConfig::default_test());
    let mut economy = Economy::new(0, 300.0);
    add_layer(&mut farm, Vec3::ZERO);
    farm.tick(0.1, 300.0);
    let egg_id = farm.eggs()[0].id();

    farm.harvest(egg_id, &mut economy);
    let money = economy.money();

    assert_eq!(farm.harvest(egg_id, &mut economy), HarvestOutcome::AlreadyHarvested { egg_id });
    assert_eq!(economy.money(), money);

    // Harvested eggs are never ticked again or re-enumerated.
    for _ in 0..5 {
        farm.tick(0.1, 300.0);
    }
    assert!(farm.egg(egg_id).is_none());

    let unknown = EggId(10_000);
    assert_eq!(farm.harvest(unknown, &mut economy), HarvestOutcome::UnknownEgg { egg_id: unknown });
}

#[test]
fn feeding_spends_only_when_it_can_feed() {
    let mut farm = farm_with(FarmConfig::default_test());
    let mut economy = Economy::new(0, 300.0);
    let hen = farm.spawn_chicken(Vec3::ZERO);

    // 10s at 5/s leaves 50 hunger.
    farm.tick(10.0, 290.0);
    assert_eq!(farm.chicken(hen).unwrap().hunger(), 50.0);

    assert_eq!(
        farm.feed_chicken(hen, 5, &mut economy),
        FeedOutcome::InsufficientFunds { chicken_id: hen }
    );
    assert_eq!(economy.money(), 0);
    assert_eq!(farm.chicken(hen).unwrap().hunger(), 50.0);

    economy.credit(10);
    assert_eq!(
        farm.feed_chicken(hen, 5, &mut economy),
        FeedOutcome::Fed { chicken_id: hen, hunger: 80.0, cost: 5 }
    );
    assert_eq!(economy.money(), 5);

    assert!(farm.kill_chicken(hen));
    assert_eq!(
        farm.feed_chicken(hen, 5, &mut economy),
        FeedOutcome::ChickenDead { chicken_id: hen }
    );
    assert_eq!(economy.money(), 5, "feeding a dead chicken must not charge");

    let ghost = ChickenId(999);
    assert_eq!(
        farm.feed_chicken(ghost, 5, &mut economy),
        FeedOutcome::UnknownChicken { chicken_id: ghost }
    );
}

#[test]
fn dead_chickens_persist_until_disposed() {
    let mut farm = farm_with(FarmConfig::default_test());
    let doomed = farm.spawn_chicken(Vec3::new(-2.0, 0.0, 0.0));
    let survivor = farm.spawn_chicken(Vec3::new(2.0, 0.0, 0.0));

    let events = farm.tick(5.0, 295.0);
    assert!(!events.iter().any(|e| matches!(e, FarmEvent::ChickenDied { .. })));

    farm.kill_chicken(doomed);
    for _ in 0..10 {
        farm.tick(0.5, 280.0);
    }
    assert_eq!(farm.chickens().len(), 2);
    assert_eq!(farm.live_count(), 1);
    assert!(!farm.chicken(doomed).unwrap().is_alive());

    assert_eq!(farm.dispose_dead(), vec![doomed]);
    assert_eq!(farm.chickens().len(), 1);
    assert!(farm.chicken(survivor).is_some());
    assert!(farm.dispose_dead().is_empty());
}

#[test]
fn starvation_emits_one_death_event() {
    let mut farm = farm_with(FarmConfig::default_test());
    let hen = farm.spawn_chicken(Vec3::ZERO);

    let mut deaths = 0;
    for _ in 0..30 {
        deaths += farm
            .tick(1.0, 300.0)
            .iter()
            .filter(|e| matches!(e, FarmEvent::ChickenDied { chicken_id, .. } if *chicken_id == hen))
            .count();
    }
    assert_eq!(deaths, 1);
    assert_eq!(farm.live_count(), 0);
    assert_eq!(farm.chickens().len(), 1);
}

#[test]
fn game_over_tracks_remaining_time() {
    let mut farm = farm_with(FarmConfig::default_test());
    assert!(!farm.is_game_over());
    farm.tick(0.1, 0.1);
    assert!(!farm.is_game_over());
    farm.tick(0.1, 0.0);
    assert!(farm.is_game_over());
}

#[test]
fn paused_farm_does_not_advance() {
    let mut farm = farm_with(FarmConfig::default_test());
    let hen = farm.spawn_chicken(Vec3::ZERO);
    farm.pause();

    assert!(farm.tick(1.0, 300.0).is_empty());
    assert_eq!(farm.frame(), 0);
    assert_eq!(farm.now(), 0.0);
    assert_eq!(farm.chicken(hen).unwrap().hunger(), 100.0);

    farm.resume();
    farm.tick(1.0, 300.0);
    assert_eq!(farm.frame(), 1);
    assert_eq!(farm.chicken(hen).unwrap().hunger(), 95.0);
}

#[test]
fn starved_chicken_stops_pushing_within_the_same_frame() {
    let mut config = FarmConfig::default_test();
    config.chicken.move_speed = 0.0;
    let chicken_config = config.chicken.clone();
    let mut farm = farm_with(config);
    let bounds = *farm.bounds();
    let mut rng = RngBank::new(9).for_slot(RngSlot::Flock);

    // Ticked alone down to ~0.5 hunger, so the next 0.2s frame kills it.
    let id = farm.allocate_chicken_id();
    let mut starving = Chicken::spawn(id, Vec3::ZERO, 0.0, &chicken_config, &mut rng);
    starving.tick(19.9, 0.0, &bounds, &[], &chicken_config, &mut rng);
    assert!(starving.is_alive() && starving.hunger() < 1.0);
    farm.insert_chicken(starving).expect("fresh id");

    let neighbor = farm.spawn_chicken(Vec3::new(0.3, 0.0, 0.0));
    let events = farm.tick(0.2, 300.0);

    assert!(events.iter().any(|e| matches!(e, FarmEvent::ChickenDied { chicken_id, .. } if *chicken_id == id)));
    assert_eq!(farm.chicken(neighbor).unwrap().position(), Vec3::new(0.3, 0.0, 0.0));
}

#[test]
fn insert_rejects_duplicate_and_foreign_ids() {
    let mut farm = farm_with(FarmConfig::default_test());
    let hen = farm.spawn_chicken(Vec3::ZERO);
    let chicken_config = farm.config().chicken.clone();
    let mut rng = RngBank::new(4).for_slot(RngSlot::Flock);

    let twin = Chicken::spawn(hen, Vec3::new(1.0, 0.0, 0.0), 0.0, &chicken_config, &mut rng);
    assert!(matches!(
        farm.insert_chicken(twin),
        Err(CoopError::DuplicateChicken { id }) if id == hen
    ));

    let stranger = Chicken::spawn(ChickenId(50), Vec3::ZERO, 0.0, &chicken_config, &mut rng);
    assert!(matches!(
        farm.insert_chicken(stranger),
        Err(CoopError::ForeignChicken { id }) if id == ChickenId(50)
    ));

    assert_eq!(farm.chickens().len(), 1);
}

/// The neighbor index must give exactly the positions a full scan gives.
#[test]
fn indexed_separation_matches_full_scan() {
    const SEED: u64 = 0xABCD;
    let mut config = FarmConfig::default_test();
    config.chicken.hunger_decay_rate = 0.0;
    let mut farm = Farm::new(config.clone(), SEED).unwrap();

    // Pack 40 chickens into a 2x2 patch so most have neighbors.
    let mut placer = RngBank::new(1).for_slot(RngSlot::Flock);
    for _ in 0..40 {
        farm.spawn_chicken(Vec3::new(placer.range(-1.0, 1.0), 0.0, placer.range(-1.0, 1.0)));
    }

    let mut manual: Vec<Chicken> = farm.chickens().to_vec();
    let mut rng = RngBank::new(SEED).for_slot(RngSlot::Behavior);
    let bounds = *farm.bounds();
    let dt = 1.0 / 30.0;
    let mut now = 0.0;

    for _ in 0..120 {
        farm.tick(dt, 300.0);

        now += dt;
        let snapshot: Vec<_> = manual.iter().map(Chicken::as_neighbor).collect();
        for chicken in &mut manual {
            chicken.tick(dt, now, &bounds, &snapshot, &config.chicken, &mut rng);
        }
    }

    for (indexed, scan) in farm.chickens().iter().zip(&manual) {
        assert_eq!(indexed.position(), scan.position(), "{} diverged", indexed.id());
    }
}
