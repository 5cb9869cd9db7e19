//! Ordered trajectory of flight points.
//!
//! A trajectory is what every `compute_from` returns: one row per simulated
//! instant, consumable as a fixed-column table by external reporting layers.

use std::ops::Deref;

use serde::Serialize;

use crate::flight_point::FlightPoint;

/// Ordered sequence of flight points forming one continuous trajectory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectory {
    points: Vec<FlightPoint>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-point trajectory, the degenerate output of an empty
    /// sequence or a zero-duration segment.
    pub fn from_point(point: FlightPoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn push(&mut self, point: FlightPoint) {
        self.points.push(point);
    }

    /// Append another trajectory's points, keeping the junction point of
    /// both children so adjacent sub-trajectories share it exactly.
    pub fn extend(&mut self, other: Trajectory) {
        self.points.extend(other.points);
    }

    pub fn first(&self) -> Option<&FlightPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&FlightPoint> {
        self.points.last()
    }

    /// Net covered ground distance: last point minus first point (m).
    /// `None` when the trajectory is empty or ground distance is unset.
    pub fn net_ground_distance(&self) -> Option<f64> {
        let first = self.first()?.ground_distance?;
        let last = self.last()?.ground_distance?;
        Some(last - first)
    }

    pub fn into_points(self) -> Vec<FlightPoint> {
        self.points
    }
}

impl Deref for Trajectory {
    type Target = [FlightPoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl IntoIterator for Trajectory {
    type Item = FlightPoint;
    type IntoIter = std::vec::IntoIter<FlightPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl FromIterator<FlightPoint> for Trajectory {
    fn from_iter<I: IntoIterator<Item = FlightPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(distance: f64) -> FlightPoint {
        FlightPoint {
            ground_distance: Some(distance),
            ..FlightPoint::new()
        }
    }

    #[test]
    fn net_ground_distance_is_last_minus_first() {
        let mut trajectory = Trajectory::new();
        trajectory.push(point(1_000.0));
        trajectory.push(point(5_000.0));
        trajectory.push(point(12_000.0));
        assert_eq!(trajectory.net_ground_distance(), Some(11_000.0));
    }

    #[test]
    fn net_ground_distance_requires_set_fields() {
        let mut trajectory = Trajectory::new();
        trajectory.push(FlightPoint::new());
        trajectory.push(point(5_000.0));
        assert_eq!(trajectory.net_ground_distance(), None);
        assert_eq!(Trajectory::new().net_ground_distance(), None);
    }

    #[test]
    fn extend_keeps_junction_points() {
        let mut left = Trajectory::new();
        left.push(point(0.0));
        left.push(point(100.0));
        let mut right = Trajectory::new();
        right.push(point(100.0));
        right.push(point(300.0));

        left.extend(right);
        assert_eq!(left.len(), 4);
        assert_eq!(left[1].ground_distance, left[2].ground_distance);
    }
}
