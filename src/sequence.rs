//! Composite flight parts.
//!
//! A flight part is either an atomic segment (climb, cruise, descent) or a
//! [`FlightSequence`] of further parts, nested to any depth. Sequences chain
//! their children: each child integrates from the previous child's last
//! point, and the full child outputs are concatenated into one continuous
//! trajectory.

use crate::climb::ClimbSegment;
use crate::cruise::CruiseSegment;
use crate::descent::DescentSegment;
use crate::errors::FlightError;
use crate::flight_point::FlightPoint;
use crate::trajectory::Trajectory;

/// A leaf segment or a nested sequence; both expose `compute_from`.
#[derive(Debug, Clone)]
pub enum FlightPart {
    Climb(ClimbSegment),
    Cruise(CruiseSegment),
    Descent(DescentSegment),
    Sequence(FlightSequence),
}

impl FlightPart {
    pub fn name(&self) -> &str {
        match self {
            FlightPart::Climb(segment) => segment.name(),
            FlightPart::Cruise(segment) => segment.name(),
            FlightPart::Descent(segment) => segment.name(),
            FlightPart::Sequence(sequence) => sequence.name(),
        }
    }

    /// Integrate this part forward from `start`.
    pub fn compute_from(&self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        match self {
            FlightPart::Climb(segment) => segment.compute_from(start),
            FlightPart::Cruise(segment) => segment.compute_from(start),
            FlightPart::Descent(segment) => segment.compute_from(start),
            FlightPart::Sequence(sequence) => sequence.compute_from(start),
        }
    }

    /// The deepest last leaf of this part: the part itself for segments,
    /// the last child's deepest leaf for sequences. `None` for an empty
    /// sequence.
    pub fn last_leaf(&self) -> Option<&FlightPart> {
        match self {
            FlightPart::Sequence(sequence) => sequence.parts().last()?.last_leaf(),
            leaf => Some(leaf),
        }
    }
}

impl From<ClimbSegment> for FlightPart {
    fn from(segment: ClimbSegment) -> Self {
        FlightPart::Climb(segment)
    }
}

impl From<CruiseSegment> for FlightPart {
    fn from(segment: CruiseSegment) -> Self {
        FlightPart::Cruise(segment)
    }
}

impl From<DescentSegment> for FlightPart {
    fn from(segment: DescentSegment) -> Self {
        FlightPart::Descent(segment)
    }
}

impl From<FlightSequence> for FlightPart {
    fn from(sequence: FlightSequence) -> Self {
        FlightPart::Sequence(sequence)
    }
}

/// Ordered, recursively composable list of flight parts.
#[derive(Debug, Clone, Default)]
pub struct FlightSequence {
    name: String,
    parts: Vec<FlightPart>,
}

impl FlightSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn with_parts(name: impl Into<String>, parts: Vec<FlightPart>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parts(&self) -> &[FlightPart] {
        &self.parts
    }

    pub fn push(&mut self, part: impl Into<FlightPart>) {
        self.parts.push(part.into());
    }

    /// Chain every child from the previous child's last point and
    /// concatenate the full outputs. An empty sequence yields the single
    /// start point.
    pub fn compute_from(&self, start: &FlightPoint) -> Result<Trajectory, FlightError> {
        if self.parts.is_empty() {
            return Ok(Trajectory::from_point(start.clone()));
        }

        let mut trajectory = Trajectory::new();
        let mut current_start = start.clone();
        for part in &self.parts {
            let child = part.compute_from(&current_start)?;
            current_start = child
                .last()
                .expect("a flight part always yields at least one point")
                .clone();
            trajectory.extend(child);
        }
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::test_support::{start_point, test_aircraft};

    fn climb(name: &str, target: f64) -> ClimbSegment {
        ClimbSegment::new(name, test_aircraft(), target, 150.0)
    }

    #[test]
    fn empty_sequence_yields_the_start_point() {
        let sequence = FlightSequence::new("empty");
        let start = start_point();
        let trajectory = sequence.compute_from(&start).unwrap();
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.first().unwrap(), &start);
    }

    #[test]
    fn children_are_chained_and_concatenated() {
        let mut sequence = FlightSequence::new("climb-phases");
        sequence.push(climb("initial-climb", 3_000.0));
        sequence.push(climb("climb-to-cruise", 9_000.0));

        let trajectory = sequence.compute_from(&start_point()).unwrap();

        // Both children contribute their full output.
        let initial: Vec<_> = trajectory
            .iter()
            .filter(|p| p.name.as_deref() == Some("initial-climb"))
            .collect();
        let upper: Vec<_> = trajectory
            .iter()
            .filter(|p| p.name.as_deref() == Some("climb-to-cruise"))
            .collect();
        assert!(initial.len() > 1);
        assert!(upper.len() > 1);

        // Junction continuity: last of child i equals first of child i+1 in
        // time, mass, altitude and ground distance.
        let last = initial.last().unwrap();
        let first = upper.first().unwrap();
        assert_eq!(last.time, first.time);
        assert_eq!(last.mass, first.mass);
        assert_eq!(last.altitude, first.altitude);
        assert_eq!(last.ground_distance, first.ground_distance);
    }

    #[test]
    fn nesting_is_transparent() {
        let inner = FlightSequence::with_parts(
            "inner",
            vec![climb("low", 2_000.0).into(), climb("mid", 5_000.0).into()],
        );
        let outer = FlightSequence::with_parts(
            "outer",
            vec![inner.into(), climb("high", 8_000.0).into()],
        );

        let trajectory = outer.compute_from(&start_point()).unwrap();
        assert_eq!(
            trajectory.last().unwrap().altitude,
            Some(8_000.0)
        );
    }

    #[test]
    fn last_leaf_walks_into_nested_sequences() {
        let inner = FlightSequence::with_parts("inner", vec![climb("deep", 4_000.0).into()]);
        let outer = FlightSequence::with_parts(
            "outer",
            vec![climb("shallow", 2_000.0).into(), inner.into()],
        );
        let part = FlightPart::from(outer);

        let leaf = part.last_leaf().unwrap();
        assert_eq!(leaf.name(), "deep");

        let empty = FlightPart::from(FlightSequence::new("empty"));
        assert!(empty.last_leaf().is_none());
    }
}
