use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::config::{
    EnergyGravity, GravitySign, MAX_TRAIL_CAPACITY, SimulationConfig, SpawnConfig,
};
use crate::engine::{InputOutcome, Simulation};
use crate::error::GravSimError;
use crate::input::InputEvent;

fn seeded(seed: u64) -> Simulation {
    let config = SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    Simulation::new(config).unwrap()
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = SimulationConfig {
        dt: -1.0,
        ..SimulationConfig::default()
    };
    assert!(matches!(
        Simulation::new(config),
        Err(GravSimError::InvalidParameter(_))
    ));

    let config = SimulationConfig {
        launch_mass_min: 5.0,
        launch_mass_max: 2.0,
        ..SimulationConfig::default()
    };
    assert!(Simulation::new(config).is_err());
}

#[test]
fn test_new_rejects_non_finite_spawn_margin() {
    for margin in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -10.0] {
        let config = SimulationConfig {
            seed: Some(0),
            spawn: SpawnConfig {
                margin,
                ..SpawnConfig::default()
            },
            ..SimulationConfig::default()
        };
        assert!(
            matches!(Simulation::new(config), Err(GravSimError::InvalidParameter(_))),
            "margin {margin} accepted"
        );
    }
}

#[test]
fn test_zero_spawn_margin_populates() {
    let config = SimulationConfig {
        seed: Some(0),
        spawn: SpawnConfig {
            margin: 0.0,
            ..SpawnConfig::default()
        },
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();

    assert_eq!(sim.populate_random().unwrap().len(), 10);
}

#[test]
fn test_new_rejects_oversized_trail_capacity() {
    for trail_capacity in [MAX_TRAIL_CAPACITY + 1, usize::MAX] {
        let config = SimulationConfig {
            seed: Some(0),
            trail_capacity,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(GravSimError::InvalidParameter(_))
        ));
    }

    let config = SimulationConfig {
        seed: Some(0),
        trail_capacity: MAX_TRAIL_CAPACITY,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    sim.populate_random().unwrap();
    assert_eq!(sim.state.particles[0].trail.capacity(), MAX_TRAIL_CAPACITY);
}

#[test]
fn test_populate_random_within_bounds() {
    let mut sim = seeded(42);
    let ids = sim.populate_random().unwrap();

    assert_eq!(ids.len(), 10);
    for p in &sim.state.particles {
        assert!(p.position.x >= 100.0 && p.position.x < 700.0);
        assert!(p.position.y >= 100.0 && p.position.y < 500.0);
        assert_eq!(p.position.x, p.position.x.floor());
        assert!(p.velocity.x.abs() <= 0.5 && p.velocity.y.abs() <= 0.5);
        assert!(p.mass() >= 2.0 && p.mass() < 10.0);
        assert!(p.radius() >= 5.0);
    }
}

#[test]
fn test_populate_random_is_deterministic_with_seed() {
    let mut a = seeded(7);
    let mut b = seeded(7);
    a.populate_random().unwrap();
    b.populate_random().unwrap();

    assert_eq!(a.state.particles, b.state.particles);
}

#[test]
fn test_populate_respects_spawn_count() {
    let config = SimulationConfig {
        seed: Some(1),
        spawn: SpawnConfig {
            count: 3,
            ..SpawnConfig::default()
        },
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    sim.populate_random().unwrap();

    assert_eq!(sim.particle_count(), 3);
}

#[test]
fn test_launch_velocity_and_mass() {
    let mut sim = seeded(3);

    let outcome = sim
        .handle(InputEvent::launch(
            Point2::new(100.0, 100.0),
            Point2::new(140.0, 80.0),
        ))
        .unwrap();

    assert!(matches!(outcome, InputOutcome::Launched(_)));
    let p = &sim.state.particles[0];
    assert_eq!(p.position, Point2::new(100.0, 100.0));
    assert_relative_eq!(p.velocity, Vector2::new(2.0, -1.0), epsilon = 1e-12);
    assert!(p.mass() >= 2.0 && p.mass() < 5.0);
    assert_eq!(p.radius(), 5.0);
}

#[test]
fn test_zero_length_drag_launches_at_rest() {
    let mut sim = seeded(3);
    let at = Point2::new(10.0, 10.0);

    sim.handle(InputEvent::launch(at, at)).unwrap();

    assert_eq!(sim.state.particles[0].velocity, Vector2::zeros());
}

#[test]
fn test_launch_rejects_non_finite_coordinates() {
    let mut sim = seeded(3);
    let result = sim.handle(InputEvent::Launch {
        start: [f64::NAN, 0.0],
        end: [0.0, 0.0],
    });

    assert!(result.is_err());
    assert_eq!(sim.particle_count(), 0);
}

#[test]
fn test_paused_step_does_nothing() {
    let mut sim = seeded(5);
    sim.populate_random().unwrap();
    sim.handle(InputEvent::TogglePause).unwrap();

    let before = sim.state.clone();
    assert!(sim.step().is_none());
    assert_eq!(sim.state, before);
}

#[test]
fn test_input_applies_while_paused() {
    let mut sim = seeded(5);
    sim.handle(InputEvent::TogglePause).unwrap();

    sim.handle(InputEvent::gravity_up()).unwrap();
    sim.handle(InputEvent::launch(Point2::origin(), Point2::new(1.0, 0.0)))
        .unwrap();

    assert!(sim.controls().paused);
    assert_eq!(sim.controls().gravity, 40.0);
    assert_eq!(sim.particle_count(), 1);

    sim.handle(InputEvent::TogglePause).unwrap();
    assert!(sim.step().is_some());
}

#[test]
fn test_gravity_scaling() {
    let mut sim = seeded(0);

    sim.handle(InputEvent::gravity_up()).unwrap();
    sim.handle(InputEvent::gravity_up()).unwrap();
    assert_eq!(sim.controls().gravity, 80.0);

    sim.handle(InputEvent::gravity_down()).unwrap();
    assert_eq!(sim.controls().gravity, 40.0);

    for factor in [0.0, -2.0, f64::NAN] {
        assert!(sim.handle(InputEvent::ScaleGravity { factor }).is_err());
    }
    assert_eq!(sim.controls().gravity, 40.0);
}

#[test]
fn test_reverse_gravity_twice_restores_sign() {
    let mut sim = seeded(0);

    sim.handle(InputEvent::ReverseGravity).unwrap();
    assert_eq!(sim.controls().gravity_sign, GravitySign::Repel);
    assert_eq!(sim.controls().signed_gravity(), -20.0);

    sim.handle(InputEvent::ReverseGravity).unwrap();
    assert_eq!(sim.controls().gravity_sign, GravitySign::Attract);
    assert_eq!(sim.controls().signed_gravity(), 20.0);
}

#[test]
fn test_repulsion_pushes_particles_apart() {
    let mut sim = seeded(0);
    sim.add_particle(10.0, Point2::new(0.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.add_particle(10.0, Point2::new(100.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.handle(InputEvent::ReverseGravity).unwrap();

    sim.step().unwrap();

    assert!(sim.state.particles[0].velocity.x < 0.0);
    assert!(sim.state.particles[1].velocity.x > 0.0);
}

#[test]
fn test_merge_toggle_changes_collision_behaviour() {
    let setup = |merge: bool| {
        let mut sim = seeded(0);
        sim.handle(InputEvent::ScaleGravity { factor: 1e-9 }).unwrap();
        sim.add_particle(4.0, Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0))
            .unwrap();
        sim.add_particle(4.0, Point2::new(6.0, 0.0), Vector2::new(-1.0, 0.0))
            .unwrap();
        if merge {
            sim.handle(InputEvent::ToggleMergeMode).unwrap();
        }
        sim
    };

    let mut elastic = setup(false);
    let report = elastic.step().unwrap();
    assert_eq!(report.collisions.bounces, 1);
    assert_eq!(elastic.particle_count(), 2);

    let mut merging = setup(true);
    let report = merging.step().unwrap();
    assert_eq!(report.collisions.merges.len(), 1);
    assert_eq!(merging.particle_count(), 1);
    assert_eq!(merging.state.particles[0].mass(), 8.0);
}

#[test]
fn test_step_advances_time() {
    let config = SimulationConfig {
        dt: 0.25,
        seed: Some(0),
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();

    for _ in 0..4 {
        sim.step().unwrap();
    }

    assert_relative_eq!(sim.state.time, 1.0);
    assert_eq!(sim.state.step_count, 4);
}

#[test]
fn test_energy_uses_reference_gravity_by_default() {
    let mut sim = seeded(0);
    sim.add_particle(2.0, Point2::new(0.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.add_particle(5.0, Point2::new(10.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.handle(InputEvent::gravity_up()).unwrap();

    // -20 * 2 * 5 / 10, live gravity ignored
    assert_relative_eq!(sim.energy().potential, -20.0);
}

#[test]
fn test_energy_live_gravity() {
    let config = SimulationConfig {
        energy_gravity: EnergyGravity::Live,
        seed: Some(0),
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    sim.add_particle(2.0, Point2::new(0.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.add_particle(5.0, Point2::new(10.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.handle(InputEvent::gravity_up()).unwrap();
    sim.handle(InputEvent::ReverseGravity).unwrap();

    assert_relative_eq!(sim.energy().potential, -40.0);
}

#[test]
fn test_hud_reflects_controls() {
    let mut sim = seeded(0);
    sim.populate_random().unwrap();
    sim.handle(InputEvent::TogglePause).unwrap();
    sim.handle(InputEvent::ToggleMergeMode).unwrap();
    sim.handle(InputEvent::ReverseGravity).unwrap();
    sim.handle(InputEvent::gravity_down()).unwrap();

    let hud = sim.hud();
    assert_eq!(
        hud.lines(),
        vec![
            "G: 10.00",
            "Particles: 10",
            "Paused",
            "Merge Mode: ON",
            "Gravity Mode: Repel"
        ]
    );
    assert!(hud.energy_line().starts_with("KE: "));
}

#[test]
fn test_views_follow_collection_order() {
    let mut sim = seeded(0);
    sim.add_particle(2.0, Point2::new(0.0, 0.0), Vector2::new(2.0, 0.0))
        .unwrap();
    sim.add_particle(3.0, Point2::new(300.0, 0.0), Vector2::zeros())
        .unwrap();
    sim.step().unwrap();

    let views = sim.views();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].id, sim.state.particles[0].id);
    assert_eq!(views[1].color[1], 100);
    // One drift so far: one trail point, no segments yet
    assert!(views[0].trail.is_empty());
}

#[test]
fn test_remove_particle_by_id() {
    let mut sim = seeded(0);
    let keep = sim
        .add_particle(2.0, Point2::new(0.0, 0.0), Vector2::zeros())
        .unwrap();
    let gone = sim
        .add_particle(2.0, Point2::new(300.0, 0.0), Vector2::zeros())
        .unwrap();

    assert!(sim.remove_particle(gone));
    assert!(!sim.remove_particle(gone));
    assert_eq!(sim.particle_count(), 1);
    assert_eq!(sim.state.particles[0].id, keep);
    assert_eq!(sim.hud().particle_count, 1);
}
