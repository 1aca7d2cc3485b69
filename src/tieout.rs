use crate::error::GeometryError;
use crate::profile::{DesignPoint, Point, PointKind, Side};

/// Extend the outer edge of `side` with a straight segment of `slope`
/// (rise:run) until it reaches `target` elevation. The segment always runs
/// outward, climbing or descending as needed.
pub fn extend(edge: Point, side: Side, slope: f64, target: f64) -> Result<DesignPoint, GeometryError> {
    if !(slope > 0.0) {
        return Err(GeometryError::NonPositiveTieOut {
            side: side.name(),
            slope,
        });
    }

    let run = (target - edge.elevation).abs() / slope;
    let station = edge.station + side.sign() * run;
    if !(run > 0.0) || station == edge.station {
        return Err(GeometryError::DegenerateTieOut {
            side: side.name(),
            datum: target,
        });
    }

    Ok(DesignPoint {
        point: Point::new(station, target),
        side: Some(side),
        kind: PointKind::TieOut,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descends_outward_to_datum() {
        let p = extend(Point::new(10.0, 2.0), Side::Right, 3.0, 0.0).unwrap();
        assert!((p.point.station - (10.0 + 2.0 / 3.0)).abs() < 1e-12);
        assert_eq!(p.point.elevation, 0.0);

        let p = extend(Point::new(-10.0, 2.0), Side::Left, 3.0, 0.0).unwrap();
        assert!((p.point.station + (10.0 + 2.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn climbs_when_datum_is_above() {
        let p = extend(Point::new(5.0, 1.0), Side::Right, 0.5, 4.0).unwrap();
        assert_eq!(p.point, Point::new(11.0, 4.0));
    }

    #[test]
    fn rejects_flat_or_negative_slope() {
        for slope in [0.0, -1.0, f64::NAN] {
            let err = extend(Point::new(10.0, 2.0), Side::Left, slope, 0.0).unwrap_err();
            assert!(matches!(err, GeometryError::NonPositiveTieOut { side: "Left", .. }));
        }
    }

    #[test]
    fn edge_at_datum_is_degenerate() {
        let err = extend(Point::new(10.0, 0.0), Side::Right, 3.0, 0.0).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateTieOut { .. }));
    }
}
