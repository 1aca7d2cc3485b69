use tracing::{debug, warn};

use crate::error::GeometryError;
use crate::params::ParameterSet;
use crate::profile::{DesignPoint, DesignProfile, Point, PointKind, Side};
use crate::side::{HalfPoint, HalfProfile};
use crate::tieout;

/// Smallest horizontal gap between neighbouring features, relative to the
/// magnitude of the placed stations.
const STATION_RESOLUTION: f64 = 1e-9;

/// Assembled design plus the tie-outs that had to be omitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assembly {
    pub design: DesignProfile,
    pub warnings: Vec<GeometryError>,
}

/// Fold away features that would land on the same station as the point
/// before them once placed around `center`. The inner point is kept.
fn settle(half: &HalfProfile, center: f64) -> HalfProfile {
    let scale = center.abs().max(1.0);
    let mut last = 0.0;
    let mut points = Vec::with_capacity(half.points.len());
    for &p in &half.points {
        if (p.offset - last).abs() <= STATION_RESOLUTION * (scale + p.offset.abs()) {
            debug!(side = half.side.name(), kind = ?p.kind, offset = p.offset, "feature below station resolution folded");
            continue;
        }
        last = p.offset;
        points.push(p);
    }
    HalfProfile {
        side: half.side,
        points,
    }
}

/// Join both half-profiles around the thalweg, place them at the datum, and
/// add each side's tie-out. The result must be strictly station-monotonic.
pub fn assemble(
    params: &ParameterSet,
    left: &HalfProfile,
    right: &HalfProfile,
) -> Result<Assembly, GeometryError> {
    let adv = &params.advanced;
    let center = params.stage1.thalweg_shift + adv.x_datum;
    let datum = adv.y_datum;

    let thalweg = DesignPoint {
        point: Point::new(center, datum),
        side: None,
        kind: PointKind::Thalweg,
    };

    let mut warnings = Vec::new();
    let [left_pts, right_pts] = [left, right].map(|half| {
        let half = settle(half, center);
        let side = half.side;
        let place = |p: HalfPoint| DesignPoint {
            point: Point::new(center + side.sign() * p.offset, datum + p.elevation),
            side: Some(side),
            kind: p.kind,
        };

        let mut pts: Vec<DesignPoint> = half.points.iter().copied().map(place).collect();
        let edge = half.edge().map_or(thalweg.point, |p| place(p).point);
        match tieout::extend(edge, side, adv.tie_out_slope.get(side), datum) {
            Ok(p) => pts.push(p),
            Err(e) => {
                warn!(error = %e, "tie-out omitted");
                warnings.push(e);
            }
        }
        pts
    });

    let mut points = Vec::with_capacity(left_pts.len() + right_pts.len() + 1);
    points.extend(left_pts.into_iter().rev());
    points.push(thalweg);
    points.extend(right_pts);

    let design = DesignProfile { points };
    if let Some(index) = design.to_profile().first_non_increasing() {
        return Err(GeometryError::NonMonotonic {
            index,
            station: design.points[index].point.station,
        });
    }

    Ok(Assembly { design, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesignerInput;
    use crate::params::validate;
    use crate::side::build_side;

    fn run(raw: &DesignerInput) -> Result<Assembly, GeometryError> {
        let p = validate(raw).unwrap();
        assemble(&p, &build_side(&p, Side::Left), &build_side(&p, Side::Right))
    }

    #[test]
    fn default_channel_layout() {
        let a = run(&DesignerInput::default()).unwrap();
        let got: Vec<Point> = a.design.points.iter().map(|p| p.point).collect();
        let tie = 10.0 + 2.0 / 3.0;
        let want = [
            Point::new(-tie, 0.0),
            Point::new(-10.0, 2.0),
            Point::new(-7.0, 0.5),
            Point::new(0.0, 0.0),
            Point::new(7.0, 0.5),
            Point::new(10.0, 2.0),
            Point::new(tie, 0.0),
        ];
        assert_eq!(got, want);
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn datum_translates_everything() {
        let mut raw = DesignerInput::default();
        raw.advanced.x_datum = 100.0;
        raw.advanced.y_datum = 50.0;
        raw.stage1.thalweg_shift = 1.0;
        let a = run(&raw).unwrap();
        let thalweg = a.design.points.iter().find(|p| p.kind == PointKind::Thalweg).unwrap();
        assert_eq!(thalweg.point, Point::new(101.0, 50.0));
        let bank = a.design.find(Side::Right, PointKind::Bankfull).unwrap();
        assert_eq!(bank.point, Point::new(110.0, 52.0));
        let first = a.design.points.first().unwrap();
        assert_eq!(first.kind, PointKind::TieOut);
        assert_eq!(first.point.elevation, 50.0);
    }

    #[test]
    fn bad_tie_out_omits_only_that_side() {
        let mut raw = DesignerInput::default();
        raw.advanced.tie_out_slope_left = 0.0;
        let a = run(&raw).unwrap();
        assert_eq!(a.warnings.len(), 1);
        assert_eq!(a.design.points.first().unwrap().kind, PointKind::Bankfull);
        assert_eq!(a.design.points.last().unwrap().kind, PointKind::TieOut);
    }

    #[test]
    fn reports_non_monotonic_halves() {
        let p = validate(&DesignerInput::default()).unwrap();
        let left = build_side(&p, Side::Left);
        let mut right = build_side(&p, Side::Right);
        right.points.insert(0, HalfPoint::new(8.0, 0.1, PointKind::BedToe));
        let err = assemble(&p, &left, &right).unwrap_err();
        assert!(matches!(err, GeometryError::NonMonotonic { index: 5, .. }));
    }

    #[test]
    fn sliver_bench_folds_into_bank_top() {
        let mut raw = DesignerInput::default();
        raw.num_stages = 2;
        raw.stage2.width_left = 1e-14;
        raw.advanced.x_datum = 1000.0;
        let a = run(&raw).unwrap();
        assert!(a.design.to_profile().is_strictly_monotonic());
        assert!(a.design.find(Side::Left, PointKind::BenchEnd).is_none());
        assert!(a.design.find(Side::Left, PointKind::SecondStage).is_some());
        assert!(a.design.find(Side::Right, PointKind::BenchEnd).is_some());
    }

    #[test]
    fn sliver_berm_folds_into_thalweg() {
        let mut raw = DesignerInput::default();
        raw.inner_berm.enabled = true;
        raw.inner_berm.width = 1e-13;
        raw.advanced.x_datum = 1000.0;
        let a = run(&raw).unwrap();
        assert!(a.design.to_profile().is_strictly_monotonic());
        assert!(a.design.points.iter().all(|p| p.kind != PointKind::InnerBermTop));
        assert_eq!(a.design.points.len(), 7);
    }
}
