//! End-to-end mission tests: a full climb/cruise/descent route, the
//! distance-matching solver, and tabular export of the resulting points.

use std::sync::Arc;

use approx::assert_relative_eq;
use flightpath::{
    AircraftModel, ClimbSegment, CruiseSegment, DescentSegment, FlightError, FlightPoint,
    FlightSequence, Polar, RangedRoute, Route, SimpleTurbofan,
};

fn narrow_body() -> AircraftModel {
    let cl: Vec<f64> = (0..=30).map(|i| i as f64 * 0.05).collect();
    let cd: Vec<f64> = cl.iter().map(|cl| 0.02 + 0.05 * cl * cl).collect();
    AircraftModel::new(
        120.0,
        Polar::new(cl, cd),
        Arc::new(SimpleTurbofan::new(240_000.0, 1.7e-5)),
    )
}

fn takeoff_point() -> FlightPoint {
    FlightPoint {
        time: Some(0.0),
        altitude: Some(0.0),
        ground_distance: Some(0.0),
        mass: Some(70_000.0),
        ..FlightPoint::new()
    }
}

fn mission_route(cruise_distance: f64) -> Route {
    let aircraft = narrow_body();
    let climb_block = FlightSequence::with_parts(
        "climb-block",
        vec![
            ClimbSegment::new("initial-climb", aircraft.clone(), 3_000.0, 140.0).into(),
            ClimbSegment::new("climb-to-cruise", aircraft.clone(), 10_000.0, 155.0).into(),
        ],
    );
    Route::new(
        "mission",
        vec![climb_block.into()],
        CruiseSegment::new("cruise", aircraft.clone(), cruise_distance),
        vec![DescentSegment::new("descent", aircraft, 0.0, 150.0).into()],
    )
}

#[test]
fn flight_points_are_field_constructible_by_callers() {
    // Callers build start points with functional-update literals; the
    // side-map for undeclared keys stays opaque but does not block them.
    let mut point = FlightPoint {
        altitude: Some(5_000.0),
        mass: Some(60_000.0),
        ..FlightPoint::new()
    };
    point.set("reserve_fuel", 1_200.0);
    assert_eq!(point.get("reserve_fuel"), Some(1_200.0));
    assert_eq!(point.get("altitude"), Some(5_000.0));
    assert!(!FlightPoint::LABELS.contains(&"reserve_fuel"));
}

#[test]
fn full_route_is_continuous_in_time_mass_and_distance() {
    let mut route = mission_route(900_000.0);
    let trajectory = route.compute_from(&takeoff_point()).unwrap();

    assert!(trajectory.len() > 50);
    for pair in trajectory.windows(2) {
        // Time and distance never step backwards, mass never grows.
        // Junction points are duplicated, so equality is allowed.
        assert!(pair[1].time.unwrap() >= pair[0].time.unwrap());
        assert!(pair[1].ground_distance.unwrap() >= pair[0].ground_distance.unwrap());
        assert!(pair[1].mass.unwrap() <= pair[0].mass.unwrap());
    }

    // The route starts where asked and ends back on the ground.
    assert_eq!(trajectory.first().unwrap().altitude, Some(0.0));
    assert_eq!(trajectory.last().unwrap().altitude, Some(0.0));
}

#[test]
fn cruise_picks_up_speed_from_the_deepest_climb_leaf() {
    let mut route = mission_route(400_000.0);
    let trajectory = route.compute_from(&takeoff_point()).unwrap();

    let reference = route.cruise_segment().climb_reference().unwrap();
    assert_eq!(reference.name, "climb-to-cruise");

    // The cruise continues at the speed the top climb leg delivered.
    let top_of_climb = trajectory
        .iter()
        .filter(|p| p.name.as_deref() == Some("climb-to-cruise"))
        .next_back()
        .unwrap();
    let first_cruise = trajectory
        .iter()
        .find(|p| p.name.as_deref() == Some("cruise"))
        .unwrap();
    assert_relative_eq!(
        first_cruise.true_airspeed.unwrap(),
        top_of_climb.true_airspeed.unwrap(),
        max_relative = 1e-9
    );
}

#[test]
fn ranged_route_hits_the_target_distance() {
    let mut mission = RangedRoute::new(mission_route(0.0), 2_500_000.0);
    let trajectory = mission.compute_from(&takeoff_point()).unwrap();

    let flown = trajectory.net_ground_distance().unwrap();
    assert!((flown - 2_500_000.0).abs() <= mission.tolerance());

    // Re-solving for a different range works on the same mission object.
    mission.set_target_distance(1_200_000.0);
    let shorter = mission.compute_from(&takeoff_point()).unwrap();
    let flown = shorter.net_ground_distance().unwrap();
    assert!((flown - 1_200_000.0).abs() <= mission.tolerance());
    assert!(shorter.last().unwrap().time.unwrap() < trajectory.last().unwrap().time.unwrap());
}

#[test]
fn ranged_route_reports_unreachable_targets() {
    // Climb and descent alone cover hundreds of kilometres; a 100 km
    // mission cannot be matched even with a zero-length cruise.
    let mut mission = RangedRoute::new(mission_route(0.0), 100_000.0);
    let result = mission.compute_from(&takeoff_point());
    assert!(matches!(result, Err(FlightError::Convergence { .. })));
}

#[test]
fn trajectory_exports_as_fixed_column_rows() {
    let mut route = mission_route(300_000.0);
    let trajectory = route.compute_from(&takeoff_point()).unwrap();

    let rows = serde_json::to_value(&trajectory).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), trajectory.len());

    // Every row carries the full declared column set; simulated points have
    // every column filled.
    let first = &rows[0];
    for label in FlightPoint::LABELS {
        assert!(first.get(label).is_some(), "missing column {label}");
        assert!(!first[label].is_null(), "unset column {label}");
    }
    assert_eq!(first["name"], serde_json::json!("initial-climb"));
    assert_eq!(first["engine_setting"], serde_json::json!("climb"));
}
