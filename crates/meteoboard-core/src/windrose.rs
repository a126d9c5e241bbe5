//! Wind-rose geometry: compass polar pairs projected onto chart axes

use std::f64::consts::TAU;

use serde::Serialize;

use crate::rollups::{Accumulator, AggregateType};
use crate::types::Dataset;

/// Radii of the dotted calibration circles. Fixed, not data driven.
pub const REFERENCE_RADII: [f64; 3] = [2.5, 3.5, 4.5];

/// Boundary points sampled per reference circle.
const CIRCLE_POINTS: usize = 100;

/// Cardinal labels sit at 1.1x the outermost speed, but never inside
/// radius 5 so they clear the calibration circles on calm datasets.
const MIN_LABEL_SPEED: f64 = 5.0;

/// One observation projected onto the rose.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct WindRosePoint {
    pub x: f64,
    pub y: f64,
}

/// An unfilled calibration circle, pre-sampled for the renderer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReferenceCircle {
    pub radius: f64,
    pub points: Vec<WindRosePoint>,
}

/// A compass label with its placement just outside the outermost point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CardinalLabel {
    pub label: &'static str,
    pub angle_deg: f64,
    pub x: f64,
    pub y: f64,
}

/// Complete wind-rose geometry for one dataset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WindRose {
    pub points: Vec<WindRosePoint>,
    pub circles: Vec<ReferenceCircle>,
    pub cardinals: Vec<CardinalLabel>,
}

/// Build the wind-rose geometry, or `None` when no observation carries both
/// a wind speed and a wind direction.
pub fn wind_rose(dataset: &Dataset) -> Option<WindRose> {
    let mut points = Vec::new();
    let mut fastest = Accumulator::new(AggregateType::Max);

    for obs in dataset.observations() {
        let (speed, direction) = match (obs.wind_speed_ms, obs.wind_dir_deg) {
            (Some(s), Some(d)) => (s, d),
            _ => continue,
        };
        points.push(to_cartesian(speed, direction));
        fastest.add(speed);
    }

    if points.is_empty() {
        return None;
    }

    let circles = REFERENCE_RADII
        .iter()
        .map(|&radius| ReferenceCircle {
            radius,
            points: (0..CIRCLE_POINTS)
                .map(|i| {
                    let theta = TAU * i as f64 / (CIRCLE_POINTS - 1) as f64;
                    WindRosePoint {
                        x: radius * theta.cos(),
                        y: radius * theta.sin(),
                    }
                })
                .collect(),
        })
        .collect();

    let label_radius = 1.1 * fastest.result().unwrap_or(0.0).max(MIN_LABEL_SPEED);
    let cardinals = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)]
        .into_iter()
        .map(|(label, angle_deg)| {
            let placed = to_cartesian(label_radius, angle_deg);
            CardinalLabel {
                label,
                angle_deg,
                x: placed.x,
                y: placed.y,
            }
        })
        .collect();

    Some(WindRose {
        points,
        circles,
        cardinals,
    })
}

/// Project a compass reading onto chart axes: north up, east right,
/// clockwise positive.
fn to_cartesian(speed: f64, direction_deg: f64) -> WindRosePoint {
    let angle = (90.0 - direction_deg).to_radians();
    WindRosePoint {
        x: speed * angle.cos(),
        y: speed * angle.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Observation;
    use chrono::NaiveDateTime;

    const TOLERANCE: f64 = 1e-9;

    fn wind(speed: Option<f64>, direction: Option<f64>) -> Observation {
        let mut obs = Observation::new(
            NaiveDateTime::parse_from_str("2024-01-01 12:00", "%Y-%m-%d %H:%M").unwrap(),
        );
        obs.wind_speed_ms = speed;
        obs.wind_dir_deg = direction;
        obs
    }

    #[test]
    fn test_north_points_up() {
        let rose = wind_rose(&Dataset::new(vec![wind(Some(5.0), Some(0.0))])).unwrap();
        let p = rose.points[0];
        assert!(p.x.abs() < TOLERANCE);
        assert!((p.y - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_east_points_right() {
        let rose = wind_rose(&Dataset::new(vec![wind(Some(5.0), Some(90.0))])).unwrap();
        let p = rose.points[0];
        assert!((p.x - 5.0).abs() < TOLERANCE);
        assert!(p.y.abs() < TOLERANCE);
    }

    #[test]
    fn test_west_points_left() {
        let rose = wind_rose(&Dataset::new(vec![wind(Some(3.0), Some(270.0))])).unwrap();
        let p = rose.points[0];
        assert!((p.x + 3.0).abs() < TOLERANCE);
        assert!(p.y.abs() < TOLERANCE);
    }

    #[test]
    fn test_incomplete_pairs_are_excluded() {
        let dataset = Dataset::new(vec![
            wind(Some(4.0), None),
            wind(None, Some(180.0)),
            wind(Some(2.0), Some(180.0)),
        ]);
        let rose = wind_rose(&dataset).unwrap();
        assert_eq!(rose.points.len(), 1);
    }

    #[test]
    fn test_no_wind_data() {
        assert!(wind_rose(&Dataset::new(vec![])).is_none());
        assert!(wind_rose(&Dataset::new(vec![wind(Some(4.0), None)])).is_none());
    }

    #[test]
    fn test_label_radius_floor_for_calm_datasets() {
        let rose = wind_rose(&Dataset::new(vec![wind(Some(1.0), Some(0.0))])).unwrap();
        let north = &rose.cardinals[0];
        assert_eq!(north.label, "N");
        assert!((north.y - 5.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_label_radius_tracks_fastest_wind() {
        let dataset = Dataset::new(vec![
            wind(Some(10.0), Some(45.0)),
            wind(Some(2.0), Some(90.0)),
        ]);
        let rose = wind_rose(&dataset).unwrap();
        let east = rose.cardinals.iter().find(|c| c.label == "E").unwrap();
        assert!((east.x - 11.0).abs() < TOLERANCE);
        assert!(east.y.abs() < TOLERANCE);
    }

    #[test]
    fn test_reference_circles_are_closed() {
        let rose = wind_rose(&Dataset::new(vec![wind(Some(5.0), Some(0.0))])).unwrap();
        assert_eq!(rose.circles.len(), REFERENCE_RADII.len());
        for circle in &rose.circles {
            assert_eq!(circle.points.len(), 100);
            let first = circle.points.first().unwrap();
            let last = circle.points.last().unwrap();
            assert!((first.x - circle.radius).abs() < TOLERANCE);
            assert!((first.x - last.x).abs() < TOLERANCE);
            assert!((first.y - last.y).abs() < 1e-6);
        }
    }
}
