use crate::config::MergeMode;
use crate::error::MergeError;
use crate::profile::{Point, Profile};

/// Combine a design with the existing cross-section according to `mode`.
pub fn combine(design: &Profile, existing: &Profile, mode: MergeMode) -> Result<Profile, MergeError> {
    match mode {
        MergeMode::Replace => Ok(design.clone()),
        MergeMode::Merge => splice(design, existing),
    }
}

/// Splice `design` into `existing`. Existing points strictly outside the
/// design's station window are kept untouched; everything inside is
/// replaced. Each design edge that falls within the existing domain takes
/// the existing ground elevation at its station, so the seams are
/// continuous. Where the survey has a vertical face exactly at a seam, the
/// seam takes the elevation of the face's outer point.
pub fn splice(design: &Profile, existing: &Profile) -> Result<Profile, MergeError> {
    let Some((ex_lo, ex_hi)) = existing.station_range() else {
        return Err(MergeError::EmptyExisting);
    };
    if let Some(index) = existing.first_decreasing() {
        return Err(MergeError::UnsortedExisting { index });
    }
    let Some((lo, hi)) = design.station_range() else {
        return Ok(existing.clone());
    };
    if hi < ex_lo || lo > ex_hi {
        return Err(MergeError::OutsideDomain { lo, hi, ex_lo, ex_hi });
    }

    let mut inner = design.points.clone();
    let last = inner.len() - 1;
    for i in [0, last] {
        let station = inner[i].station;
        let mut on_station = existing.points.iter().filter(|p| p.station == station);
        let outer = if i == last { on_station.last() } else { on_station.next() };
        if let Some(elevation) = outer.map(|p| p.elevation).or_else(|| existing.elevation_at(station)) {
            inner[i] = Point::new(station, elevation);
        }
    }

    let before = existing.points.iter().take_while(|p| p.station < lo);
    let after = existing.points.iter().skip_while(|p| p.station <= hi);

    let mut points = Vec::with_capacity(existing.len() + inner.len());
    points.extend(before.copied());
    points.extend(inner);
    points.extend(after.copied());
    Ok(Profile::new(points))
}
