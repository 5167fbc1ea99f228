use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::forces::gravity::DirectGravity;
use crate::forces::{ForceModel, G};
use crate::state::SystemState;

fn pair(mass_a: f64, pos_a: Point2<f64>, mass_b: f64, pos_b: Point2<f64>) -> SystemState {
    let mut system = SystemState::new(100);
    system
        .add_particle(mass_a, 5.0, pos_a, Vector2::zeros())
        .unwrap();
    system
        .add_particle(mass_b, 5.0, pos_b, Vector2::zeros())
        .unwrap();
    system
}

#[test]
fn test_force_magnitude() {
    let system = pair(10.0, Point2::new(0.0, 0.0), 10.0, Point2::new(10.0, 0.0));
    let gravity = DirectGravity::new(G);

    // F = G m m / r² = 20 * 10 * 10 / 100 = 20
    let force = gravity.force_on(0, &system.particles);
    assert_relative_eq!(force.x, 20.0);
    assert_relative_eq!(force.y, 0.0);
}

#[test]
fn test_acceleration_divides_by_own_mass() {
    let system = pair(2.0, Point2::new(0.0, 0.0), 8.0, Point2::new(0.0, 4.0));
    let gravity = DirectGravity::new(1.0);

    // F = 1 * 2 * 8 / 16 = 1, a_light = 1/2, a_heavy = 1/8
    let a0 = gravity.acceleration(0, &system.particles);
    let a1 = gravity.acceleration(1, &system.particles);
    assert_relative_eq!(a0.y, 0.5);
    assert_relative_eq!(a1.y, -0.125);
}

#[test]
fn test_newtons_third_law() {
    let gravity = DirectGravity::new(G);
    let positions = [
        (Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)),
        (Point2::new(-120.5, 33.0), Point2::new(400.0, -2.25)),
        (Point2::new(1e-3, 0.0), Point2::new(0.0, 1e-3)),
    ];

    for (pa, pb) in positions {
        let system = pair(3.5, pa, 9.25, pb);
        let f_ab = gravity.force_on(0, &system.particles);
        let f_ba = gravity.force_on(1, &system.particles);
        assert_relative_eq!(f_ab.x, -f_ba.x, max_relative = 1e-12);
        assert_relative_eq!(f_ab.y, -f_ba.y, max_relative = 1e-12);
    }
}

#[test]
fn test_coincident_particles_exert_no_force() {
    let system = pair(5.0, Point2::new(50.0, 50.0), 7.0, Point2::new(50.0, 50.0));
    let gravity = DirectGravity::new(G);

    let accelerations = gravity.accelerations(&system.particles);
    assert_eq!(accelerations, vec![Vector2::zeros(), Vector2::zeros()]);
    assert_eq!(gravity.potential_energy(&system.particles), 0.0);
}

#[test]
fn test_negative_constant_repels() {
    let system = pair(10.0, Point2::new(0.0, 0.0), 10.0, Point2::new(10.0, 0.0));

    let attract = DirectGravity::new(G).acceleration(0, &system.particles);
    let repel = DirectGravity::new(-G).acceleration(0, &system.particles);

    assert!(attract.x > 0.0);
    assert_relative_eq!(repel.x, -attract.x);
}

#[test]
fn test_superposition_of_three_bodies() {
    let mut system = pair(1.0, Point2::new(0.0, 0.0), 4.0, Point2::new(2.0, 0.0));
    system
        .add_particle(4.0, 5.0, Point2::new(-2.0, 0.0), Vector2::zeros())
        .unwrap();

    // Symmetric pulls cancel on the middle particle
    let accel = DirectGravity::new(G).acceleration(0, &system.particles);
    assert_relative_eq!(accel.x, 0.0);
    assert_relative_eq!(accel.y, 0.0);
}

#[test]
fn test_potential_energy_counts_each_pair_once() {
    let system = pair(2.0, Point2::new(0.0, 0.0), 3.0, Point2::new(0.0, 6.0));

    // U = -G m m / r = -20 * 2 * 3 / 6 = -20
    let potential = DirectGravity::new(G).potential_energy(&system.particles);
    assert_relative_eq!(potential, -20.0);
}
