/// Example: walk the middle angle towards 90° and watch extraction degrade
///
/// Usage: cargo run --example gimbal_lock -- [order]
use rigid3d_core::{Axis, Euler, Order, GIMBAL_EPSILON};
use rigid3d_terminal::Report;
use std::env;
use std::io::{self, stdout, Write};

fn main() -> io::Result<()> {
    let order: Order = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{e}")))?,
        None => Order::XYZ,
    };

    let mut out = stdout();
    for middle in [60.0, 85.0, 89.0, 89.9, 90.0] {
        // Put `middle` on the second axis of the order.
        let mut degrees = [25.0_f32, 25.0, 25.0];
        let index = match order.axes()[1] {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };
        degrees[index] = middle;

        let euler = Euler::from_degrees(degrees[0], degrees[1], degrees[2], order);
        let report = Report::new(euler, GIMBAL_EPSILON);
        writeln!(out, "--- middle angle {middle}° ---")?;
        report.draw(&mut out, 4)?;
        writeln!(out, "rebuilds matrix: {}", report.round_trips(1e-4))?;
    }
    out.flush()
}
