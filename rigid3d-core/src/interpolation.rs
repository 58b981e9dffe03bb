/// Scalar linear interpolation used for stepping along triangle edges
use crate::error::{Error, Result};

/// Values of the line through `(x_a, y_a)` and `(x_b, y_b)` sampled at
/// `x_a, x_a + 1, ...` up to `x_b`.
///
/// Equal x coordinates yield the single value `y_a`. `x_a > x_b` yields an
/// empty sequence, as does a range [`linear_with_step`] rejects.
pub fn linear(x_a: f32, y_a: f32, x_b: f32, y_b: f32) -> Vec<f32> {
    linear_with_step(x_a, y_a, x_b, y_b, 1.0).unwrap_or_default()
}

/// Largest sample count a `Vec<f32>` can be asked to hold.
const MAX_SAMPLES: f32 = (isize::MAX as usize / std::mem::size_of::<f32>()) as f32;

/// [`linear`] with an explicit step along x.
///
/// Fails with [`Error::InvalidStep`] unless `step` is finite and positive, and
/// with [`Error::InvalidRange`] when an x endpoint is not finite or the range
/// holds more samples than a `Vec` can address.
pub fn linear_with_step(x_a: f32, y_a: f32, x_b: f32, y_b: f32, step: f32) -> Result<Vec<f32>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(Error::InvalidStep(step));
    }
    let invalid_range = Error::InvalidRange { from: x_a, to: x_b };
    if !(x_a.is_finite() && x_b.is_finite()) {
        return Err(invalid_range);
    }
    if x_a == x_b {
        return Ok(vec![y_a]);
    }
    if x_a > x_b {
        return Ok(Vec::new());
    }

    let span = ((x_b - x_a) / step).floor();
    if !(span.is_finite() && span < MAX_SAMPLES) {
        return Err(invalid_range);
    }

    let slope = (y_b - y_a) / (x_b - x_a);
    let samples = span as usize;
    Ok((0..=samples)
        .map(|i| y_a + slope * step * i as f32)
        .collect())
}

/// The two sides of a triangle `ABC` swept along y, with x as the dependent
/// value.
///
/// The vertices must be sorted so that `y_a <= y_b <= y_c`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleEdges {
    /// x along the long edge `AC`.
    pub long: Vec<f32>,
    /// x along `AB` followed by `BC`, with the shared vertex `B` counted once.
    pub short: Vec<f32>,
}

pub fn edge(x_a: f32, y_a: f32, x_b: f32, y_b: f32, x_c: f32, y_c: f32) -> TriangleEdges {
    edge_with_step(x_a, y_a, x_b, y_b, x_c, y_c, 1.0).unwrap_or_else(|_| TriangleEdges {
        long: Vec::new(),
        short: Vec::new(),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn edge_with_step(
    x_a: f32,
    y_a: f32,
    x_b: f32,
    y_b: f32,
    x_c: f32,
    y_c: f32,
    step: f32,
) -> Result<TriangleEdges> {
    let mut short = linear_with_step(y_a, x_a, y_b, x_b, step)?;
    let bc = linear_with_step(y_b, x_b, y_c, x_c, step)?;
    let long = linear_with_step(y_a, x_a, y_c, x_c, step)?;

    short.pop();
    short.extend(bc);
    Ok(TriangleEdges { long, short })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(linear(0.0, 0.0, 4.0, 8.0), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(linear(1.0, 10.0, 3.0, 4.0), vec![10.0, 7.0, 4.0]);
    }

    #[test]
    fn test_linear_equal_x() {
        assert_eq!(linear(5.0, 0.0, 5.0, 10.0), vec![0.0]);
    }

    #[test]
    fn test_linear_reversed_range_is_empty() {
        assert!(linear(4.0, 0.0, 0.0, 8.0).is_empty());
    }

    #[test]
    fn test_linear_with_step() {
        assert_eq!(
            linear_with_step(0.0, 0.0, 2.0, 1.0, 0.5).unwrap(),
            vec![0.0, 0.25, 0.5, 0.75, 1.0]
        );
        // The last sample stops short of x_b when the step does not divide it.
        assert_eq!(linear_with_step(0.0, 0.0, 2.5, 5.0, 1.0).unwrap(), vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_invalid_step() {
        assert_eq!(
            linear_with_step(0.0, 0.0, 1.0, 1.0, 0.0),
            Err(Error::InvalidStep(0.0))
        );
        assert!(linear_with_step(0.0, 0.0, 1.0, 1.0, -1.0).is_err());
        assert!(linear_with_step(0.0, 0.0, 1.0, 1.0, f32::NAN).is_err());
    }

    #[test]
    fn test_unbounded_range_is_rejected() {
        assert_eq!(
            linear_with_step(0.0, 0.0, f32::INFINITY, 1.0, 1.0),
            Err(Error::InvalidRange {
                from: 0.0,
                to: f32::INFINITY
            })
        );
        assert!(linear_with_step(f32::NAN, 0.0, 1.0, 1.0, 1.0).is_err());
        // Finite endpoints whose difference overflows f32.
        assert!(linear_with_step(-3e38, 0.0, 3e38, 1.0, 1.0).is_err());
        // Finite span with more samples than a Vec can hold.
        assert!(linear_with_step(0.0, 0.0, 1e30, 1.0, 1.0).is_err());

        assert!(linear(0.0, 0.0, f32::INFINITY, 1.0).is_empty());
        assert!(linear(-3e38, 0.0, 3e38, 1.0).is_empty());
    }

    #[test]
    fn test_edge_with_invalid_step() {
        assert_eq!(
            edge_with_step(0.0, 0.0, 4.0, 2.0, 0.0, 4.0, 0.0),
            Err(Error::InvalidStep(0.0))
        );
    }

    #[test]
    fn test_edge_with_unbounded_vertex_is_empty() {
        let edges = edge(0.0, 0.0, 4.0, 2.0, 0.0, f32::INFINITY);
        assert!(edges.long.is_empty());
        assert!(edges.short.is_empty());
    }

    #[test]
    fn test_edge() {
        let edges = edge(0.0, 0.0, 4.0, 2.0, 0.0, 4.0);
        assert_eq!(edges.long, vec![0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(edges.short, vec![0.0, 2.0, 4.0, 2.0, 0.0]);
        assert_eq!(edges.long.len(), edges.short.len());
    }

    #[test]
    fn test_edge_flat_top() {
        // A and B share a row: AB collapses to x_a, then BC continues from x_b.
        let edges = edge(0.0, 0.0, 4.0, 0.0, 2.0, 2.0);
        assert_eq!(edges.long, vec![0.0, 1.0, 2.0]);
        assert_eq!(edges.short, vec![4.0, 3.0, 2.0]);
    }
}
