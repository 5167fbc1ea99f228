//! Collision demo
//!
//! Runs the default random batch plus a few launched particles without a
//! window, first with elastic bounces and then with merging, and prints the
//! HUD and energy lines as it goes.
//!
//! Run with: cargo run --package gravsim --example collision_demo

use nalgebra::Point2;

use gravsim::config::SimulationConfig;
use gravsim::{InputEvent, Simulation};

fn run(merge: bool) -> gravsim::Result<()> {
    let config = SimulationConfig {
        seed: Some(2024),
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config)?;
    sim.populate_random()?;

    // Three drags toward the middle of the world
    for (start, end) in [
        (Point2::new(150.0, 150.0), Point2::new(190.0, 170.0)),
        (Point2::new(650.0, 150.0), Point2::new(610.0, 180.0)),
        (Point2::new(400.0, 520.0), Point2::new(400.0, 480.0)),
    ] {
        sim.handle(InputEvent::launch(start, end))?;
    }
    if merge {
        sim.handle(InputEvent::ToggleMergeMode)?;
    }

    println!("\n{}", "=".repeat(60));
    println!("{} mode", if merge { "Merge" } else { "Elastic" });
    println!("{}", "=".repeat(60));

    let total_steps = 600;
    let mut bounces = 0;
    let mut merges = 0;

    for step in 0..total_steps {
        let Some(report) = sim.step() else {
            continue;
        };
        bounces += report.collisions.bounces;
        for merge in &report.collisions.merges {
            merges += 1;
            println!(
                "t={:5.0}: particle {} absorbed {} (mass {:.2})",
                report.time, merge.survivor.0, merge.absorbed.0, merge.mass
            );
        }

        if step % 150 == 0 {
            println!("t={:5.0}: {}", report.time, sim.hud().energy_line());
        }
    }

    println!("\nFinal HUD:");
    for line in sim.hud().lines() {
        println!("  {line}");
    }
    println!("  {}", sim.hud().energy_line());
    println!("  Bounces: {bounces}, merges: {merges}");
    println!(
        "  Total mass: {:.3}, momentum: ({:.4}, {:.4})",
        sim.state.total_mass(),
        sim.state.total_momentum().x,
        sim.state.total_momentum().y
    );

    Ok(())
}

fn main() -> gravsim::Result<()> {
    println!("gravsim collision demo");
    run(false)?;
    run(true)?;
    Ok(())
}
