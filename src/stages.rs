use crate::params::{ParameterSet, Terrace};
use crate::profile::{PointKind, Side};
use crate::side::HalfPoint;

/// Point roles for one terrace: (end of the flat, top of its bank).
const BENCH: (PointKind, PointKind) = (PointKind::BenchEnd, PointKind::SecondStage);
const FLOODPLAIN: (PointKind, PointKind) = (PointKind::FloodplainEnd, PointKind::ThirdStage);

/// Append the active higher stages to a half-profile that ends at the
/// bankfull bank top. Each stage starts from the top of the one below, so
/// offsets and elevations accumulate. Zero-width benches and zero-depth
/// banks add no point.
pub fn stack(params: &ParameterSet, side: Side, points: &mut Vec<HalfPoint>) {
    let active = [(params.stage2, BENCH), (params.stage3, FLOODPLAIN)];
    for (terrace, kinds) in active {
        // Stage 3 without stage 2 cannot be expressed by validated input.
        let Some(terrace) = terrace else { break };
        let Some(&top) = points.last() else { return };
        points.extend(layer(&terrace, side, top, kinds));
    }
}

fn layer(
    terrace: &Terrace,
    side: Side,
    top: HalfPoint,
    (end_kind, bank_kind): (PointKind, PointKind),
) -> impl Iterator<Item = HalfPoint> {
    let width = terrace.width.get(side);
    let bench = HalfPoint::new(
        top.offset + width,
        top.elevation + terrace.slope.get(side) * width,
        end_kind,
    );

    let run = terrace.delta_depth * terrace.side_slope;
    let bank = HalfPoint::new(
        bench.offset + run,
        bench.elevation + terrace.delta_depth,
        bank_kind,
    );

    [(width > 0.0).then_some(bench), (run > 0.0).then_some(bank)]
        .into_iter()
        .flatten()
}
