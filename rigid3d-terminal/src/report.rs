/// Colored conversion report for a single Euler rotation
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use rigid3d_core::{Axis, Degeneracy, Euler, Matrix4, Order, Quaternion, Vector4};
use std::io::Write;

/// Every representation derived from one Euler triple.
#[derive(Debug, Clone)]
pub struct Report {
    pub euler: Euler,
    pub matrix: Matrix4,
    pub quaternion: Quaternion,
    pub angle: f32,
    pub axis: Result<Vector4, Degeneracy>,
    /// Angles recovered from `matrix` in the same order.
    pub recovered: Euler,
    pub gimbal_lock: bool,
}

impl Report {
    pub fn new(euler: Euler, epsilon: f32) -> Self {
        let matrix = euler.rotation_matrix();
        let quaternion = euler.to_quaternion();
        let (recovered, gimbal_lock) = Euler::extract(&matrix, euler.order, epsilon);

        Self {
            euler,
            matrix,
            quaternion,
            angle: quaternion.to_angle(),
            axis: quaternion.to_axis(),
            recovered,
            gimbal_lock,
        }
    }

    /// Whether the recovered angles rebuild the original matrix.
    pub fn round_trips(&self, tolerance: f32) -> bool {
        self.recovered
            .rotation_matrix()
            .approx_eq(&self.matrix, tolerance)
    }

    pub fn draw<W: Write>(&self, writer: &mut W, precision: usize) -> std::io::Result<()> {
        let [alpha, beta, gamma] = self.euler.to_degrees();
        heading(writer, "Euler")?;
        writer.queue(Print(format!(
            "alpha: {alpha:.precision$}° beta: {beta:.precision$}° gamma: {gamma:.precision$}° order: {}\n",
            self.euler.order
        )))?;

        heading(writer, "Rotation matrix")?;
        writer.queue(Print(format!("{:.precision$}\n", self.matrix)))?;

        heading(writer, "Quaternion")?;
        writer.queue(Print(format!("{:.precision$}\n", self.quaternion)))?;

        heading(writer, "Angle-axis")?;
        match self.axis {
            Ok(axis) => writer.queue(Print(format!(
                "{:.precision$}° about {:.precision$}\n",
                self.angle.to_degrees(),
                axis.xyz()
            )))?,
            Err(_) => writer.queue(Print("no rotation (axis undefined)\n"))?,
        };

        let [alpha, beta, gamma] = self.recovered.to_degrees();
        heading(writer, "Recovered")?;
        writer.queue(Print(format!(
            "alpha: {alpha:.precision$}° beta: {beta:.precision$}° gamma: {gamma:.precision$}°\n"
        )))?;

        if self.gimbal_lock {
            writer
                .queue(SetForegroundColor(Color::Yellow))?
                .queue(Print(format!(
                    "Gimbal lock: the {} angle was set to 0 and only the combined rotation is meaningful\n",
                    angle_name(self.euler.order)
                )))?
                .queue(ResetColor)?;
        }
        Ok(())
    }
}

fn heading<W: Write>(writer: &mut W, title: &str) -> std::io::Result<()> {
    writer
        .queue(SetForegroundColor(Color::Cyan))?
        .queue(Print(format!("{title}: ")))?
        .queue(ResetColor)?;
    Ok(())
}

/// Name of the angle about the first axis of `order`.
fn angle_name(order: Order) -> &'static str {
    match order.axes()[0] {
        Axis::X => "alpha",
        Axis::Y => "beta",
        Axis::Z => "gamma",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigid3d_core::GIMBAL_EPSILON;

    fn drawn(report: &Report, precision: usize) -> String {
        let mut out = Vec::new();
        report.draw(&mut out, precision).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_regular_rotation() {
        let report = Report::new(Euler::from_degrees(30.0, 45.0, 60.0, Order::ZYX), GIMBAL_EPSILON);
        assert!(!report.gimbal_lock);
        assert!(report.round_trips(1e-5));
        assert!(report.axis.is_ok());

        let text = drawn(&report, 3);
        assert!(text.contains("alpha: 30.000° beta: 45.000° gamma: 60.000° order: ZYX"));
        assert!(text.contains("Quaternion(w: "));
        assert!(!text.contains("Gimbal lock"));
    }

    #[test]
    fn test_gimbal_lock_is_flagged() {
        let report = Report::new(Euler::from_degrees(20.0, 90.0, 10.0, Order::XYZ), 1e-4);
        assert!(report.gimbal_lock);
        assert_eq!(report.recovered.alpha, 0.0);
        assert!(report.round_trips(1e-4));
        assert!(drawn(&report, 2).contains("the alpha angle was set to 0"));
    }

    #[test]
    fn test_identity_has_no_axis() {
        let report = Report::new(Euler::default(), GIMBAL_EPSILON);
        assert_eq!(report.axis, Err(Degeneracy::ZeroLength));
        assert!(drawn(&report, 1).contains("axis undefined"));
    }

    #[test]
    fn test_angle_name() {
        assert_eq!(angle_name(Order::XZY), "alpha");
        assert_eq!(angle_name(Order::YXZ), "beta");
        assert_eq!(angle_name(Order::ZYX), "gamma");
    }
}
