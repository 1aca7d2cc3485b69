use crate::params::ParameterSet;
use crate::profile::{PointKind, Side};
use crate::stages;

/// A point of one half of the channel in local coordinates: `offset` is the
/// horizontal distance outward from the thalweg, `elevation` is relative to
/// the thalweg bed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfPoint {
    pub offset: f64,
    pub elevation: f64,
    pub kind: PointKind,
}

impl HalfPoint {
    #[inline]
    pub fn new(offset: f64, elevation: f64, kind: PointKind) -> Self {
        Self {
            offset,
            elevation,
            kind,
        }
    }

    #[inline]
    fn lerp(a: HalfPoint, b: HalfPoint, t: f64, kind: PointKind) -> HalfPoint {
        HalfPoint::new(
            a.offset + (b.offset - a.offset) * t,
            a.elevation + (b.elevation - a.elevation) * t,
            kind,
        )
    }
}

/// One side of the channel from the thalweg outward. The thalweg itself is
/// shared by both sides and not included. Offsets strictly increase.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfProfile {
    pub side: Side,
    pub points: Vec<HalfPoint>,
}

impl HalfProfile {
    /// Outer edge before tie-out: top of the highest active stage.
    pub fn edge(&self) -> Option<HalfPoint> {
        self.points.last().copied()
    }
}

/// Fraction of the shorter adjacent segment used as the fillet tangent
/// distance.
const FILLET_REACH: f64 = 0.25;

/// Roundness below this keeps the sharp corner; smaller fillets would put
/// points closer than station precision.
const SHARP_BELOW: f64 = 1e-6;

/// Replace the sharp `corner` between `prev` and `next` with a rounded
/// transition. At `roundness` 0 the corner stays a single vertex. Otherwise
/// the corner becomes three points: the two fillet tangent points and the
/// midpoint between the sharp corner and the fillet chord midpoint, each
/// pulled toward the sharp corner by `1 - roundness`.
pub fn round_corner(
    prev: HalfPoint,
    corner: HalfPoint,
    next: HalfPoint,
    roundness: f64,
) -> Vec<HalfPoint> {
    if roundness < SHARP_BELOW {
        return vec![corner];
    }

    let len_in = (corner.offset - prev.offset).hypot(corner.elevation - prev.elevation);
    let len_out = (next.offset - corner.offset).hypot(next.elevation - corner.elevation);
    let reach = FILLET_REACH * len_in.min(len_out);
    if reach <= 0.0 {
        return vec![corner];
    }

    let start = HalfPoint::lerp(corner, prev, reach / len_in, PointKind::FilletStart);
    let end = HalfPoint::lerp(corner, next, reach / len_out, PointKind::FilletEnd);
    let chord_mid = HalfPoint::lerp(start, end, 0.5, PointKind::BedToe);
    let fillet = HalfPoint::lerp(corner, chord_mid, 0.5, PointKind::BedToe);

    vec![
        HalfPoint::lerp(corner, start, roundness, PointKind::FilletStart),
        HalfPoint::lerp(corner, fillet, roundness, PointKind::BedToe),
        HalfPoint::lerp(corner, end, roundness, PointKind::FilletEnd),
    ]
}

/// Build one half-profile: bed (with inner berm), rounded toe, bankfull
/// bank, then the stacked bench and floodplain stages.
pub fn build_side(params: &ParameterSet, side: Side) -> HalfProfile {
    let s1 = &params.stage1;
    let adv = &params.advanced;

    let thalweg = HalfPoint::new(0.0, 0.0, PointKind::Thalweg);
    let mut points = Vec::with_capacity(12);

    let mut before_toe = thalweg;
    if let Some(berm) = params.inner_berm {
        let top = HalfPoint::new(0.5 * berm.width, berm.max_depth, PointKind::InnerBermTop);
        points.push(top);
        before_toe = top;
    }

    let toe = HalfPoint::new(
        params.half_bed(side),
        s1.bed_slope * adv.bed_slope_multiplier.get(side),
        PointKind::BedToe,
    );

    let rise = params.bank_height() * adv.height_multiplier.get(side);
    let run = rise * s1.side_slope * adv.side_slope_multiplier.get(side);
    let bankfull = HalfPoint::new(toe.offset + run, toe.elevation + rise, PointKind::Bankfull);

    points.extend(round_corner(before_toe, toe, bankfull, s1.roundness));
    points.push(bankfull);

    stages::stack(params, side, &mut points);

    HalfProfile { side, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesignerInput;
    use crate::params::validate;

    fn kinds(h: &HalfProfile) -> Vec<PointKind> {
        h.points.iter().map(|p| p.kind).collect()
    }

    fn assert_increasing(h: &HalfProfile) {
        let mut last = 0.0;
        for p in &h.points {
            assert!(p.offset > last, "{:?} not beyond {last}", p);
            last = p.offset;
        }
    }

    #[test]
    fn default_channel_has_toe_and_bank() {
        let p = validate(&DesignerInput::default()).unwrap();
        let h = build_side(&p, Side::Right);
        assert_eq!(kinds(&h), vec![PointKind::BedToe, PointKind::Bankfull]);
        assert_eq!(h.points[0].offset, 7.0);
        assert_eq!(h.points[0].elevation, 0.5);
        assert_eq!(h.points[1].offset, 10.0);
        assert_eq!(h.points[1].elevation, 2.0);
    }

    #[test]
    fn thalweg_shift_moves_toes_apart_unevenly() {
        let mut raw = DesignerInput::default();
        raw.stage1.thalweg_shift = 2.0;
        let p = validate(&raw).unwrap();
        assert_eq!(build_side(&p, Side::Right).points[0].offset, 5.0);
        assert_eq!(build_side(&p, Side::Left).points[0].offset, 9.0);
    }

    #[test]
    fn multipliers_scale_their_side_only() {
        let mut raw = DesignerInput::default();
        raw.advanced.height_multiplier_left = 2.0;
        raw.advanced.side_slope_multiplier_left = 0.5;
        raw.advanced.bed_slope_multiplier_left = 2.0;
        let p = validate(&raw).unwrap();
        let left = build_side(&p, Side::Left);
        let right = build_side(&p, Side::Right);
        // rise 3.0, run 3.0 * 2 * 0.5
        assert_eq!(left.points[0].elevation, 1.0);
        assert_eq!(left.points[1].elevation, 4.0);
        assert_eq!(left.points[1].offset, 10.0);
        assert_eq!(right.points[1].elevation, 2.0);
    }

    #[test]
    fn full_roundness_inserts_fillet_points() {
        let mut raw = DesignerInput::default();
        raw.stage1.roundness = 1.0;
        let p = validate(&raw).unwrap();
        let h = build_side(&p, Side::Left);
        assert_eq!(
            kinds(&h),
            vec![
                PointKind::FilletStart,
                PointKind::BedToe,
                PointKind::FilletEnd,
                PointKind::Bankfull
            ]
        );
        assert_increasing(&h);
        // Rounded toe sits above the sharp corner it replaces.
        assert!(h.points[1].elevation > 0.5);
        assert!(h.points[1].offset < 7.0);
    }

    #[test]
    fn partial_roundness_interpolates_toward_sharp_corner() {
        let corner = HalfPoint::new(7.0, 0.5, PointKind::BedToe);
        let prev = HalfPoint::new(0.0, 0.0, PointKind::Thalweg);
        let next = HalfPoint::new(10.0, 2.0, PointKind::Bankfull);
        let full = round_corner(prev, corner, next, 1.0);
        let half = round_corner(prev, corner, next, 0.5);
        for (f, h) in full.iter().zip(&half) {
            assert!((h.offset - (corner.offset + f.offset) / 2.0).abs() < 1e-12);
            assert!((h.elevation - (corner.elevation + f.elevation) / 2.0).abs() < 1e-12);
        }
        assert_eq!(round_corner(prev, corner, next, 0.0), vec![corner]);
    }

    #[test]
    fn inner_berm_rises_from_thalweg() {
        let mut raw = DesignerInput::default();
        raw.inner_berm.enabled = true;
        raw.inner_berm.width = 2.0;
        raw.inner_berm.max_depth = 0.25;
        raw.stage1.roundness = 0.5;
        let p = validate(&raw).unwrap();
        let h = build_side(&p, Side::Right);
        assert_eq!(h.points[0].kind, PointKind::InnerBermTop);
        assert_eq!(h.points[0].offset, 1.0);
        assert_eq!(h.points[0].elevation, 0.25);
        assert_increasing(&h);
    }
}
