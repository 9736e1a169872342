//! Plan one steering maneuver and print its controls and end pose.
//!
//! Run with: `cargo run --example steer_demo`

use sarathi_steer::{HcReedsSheppSpace, State};

fn main() {
    let space = HcReedsSheppSpace::new(1.0, 1.0, 0.1).unwrap();
    let start = State::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let goal = State::new(3.0, 3.0, std::f64::consts::FRAC_PI_2, 0.0, 0.0);

    let path = space.shortest_path(&start, &goal).expect("path exists");
    println!("family: {}  length: {:.4}", path.family(), path.length);

    println!("controls:");
    for control in space.get_controls(&start, &goal) {
        println!(
            "  delta_s {:8.4}  kappa {:6.3}  sigma {:6.3}",
            control.delta_s, control.kappa, control.sigma
        );
    }

    let samples = space.get_path(&start, &goal);
    let end = samples.last().unwrap();
    println!(
        "end pose: ({:.5}, {:.5}, {:.5}) after {} samples",
        end.x, end.y, end.theta, samples.len()
    );
}
