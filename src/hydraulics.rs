use serde::Serialize;

use crate::profile::{DesignProfile, PointKind, Profile, Side};

/// Flow geometry below a water surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Section {
    pub area: f64,
    pub wetted_perimeter: f64,
    pub top_width: f64,
}

impl Section {
    pub fn hydraulic_radius(&self) -> f64 {
        if self.wetted_perimeter > 0.0 {
            self.area / self.wetted_perimeter
        } else {
            0.0
        }
    }

    /// Area over top width.
    pub fn mean_depth(&self) -> f64 {
        if self.top_width > 0.0 {
            self.area / self.top_width
        } else {
            0.0
        }
    }
}

/// Integrate the wetted part of `profile` below water surface elevation
/// `wse`. Vertical segments carry no width and are skipped.
pub fn section_at(profile: &Profile, wse: f64) -> Section {
    let mut s = Section::default();
    for w in profile.points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let dx = b.station - a.station;
        if !(dx > 0.0) {
            continue;
        }
        let (d1, d2) = (wse - a.elevation, wse - b.elevation);
        let slope_len = (b.elevation - a.elevation).hypot(dx) / dx;

        let (wet, depth_sum) = match (d1 >= 0.0, d2 >= 0.0) {
            (true, true) => (dx, d1 + d2),
            (false, false) => continue,
            // Partially wet: waterline crosses the segment.
            (true, false) => (dx * d1 / (d1 - d2), d1),
            (false, true) => (dx * d2 / (d2 - d1), d2),
        };
        s.area += 0.5 * depth_sum * wet;
        s.wetted_perimeter += slope_len * wet;
        s.top_width += wet;
    }
    s
}

/// Bankfull channel geometry, measured at the lower of the two bankfull
/// bank tops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BankfullSummary {
    pub stage: f64,
    pub area: f64,
    pub wetted_perimeter: f64,
    pub top_width: f64,
    pub hydraulic_radius: f64,
    pub mean_depth: f64,
    pub width_depth_ratio: f64,
}

pub fn bankfull_summary(design: &DesignProfile) -> Option<BankfullSummary> {
    let left = design.find(Side::Left, PointKind::Bankfull)?.point;
    let right = design.find(Side::Right, PointKind::Bankfull)?.point;
    let stage = left.elevation.min(right.elevation);

    let channel: Profile = design
        .to_profile()
        .points
        .into_iter()
        .filter(|p| p.station >= left.station && p.station <= right.station)
        .collect();
    let s = section_at(&channel, stage);
    let mean_depth = s.mean_depth();

    Some(BankfullSummary {
        stage,
        area: s.area,
        wetted_perimeter: s.wetted_perimeter,
        top_width: s.top_width,
        hydraulic_radius: s.hydraulic_radius(),
        mean_depth,
        width_depth_ratio: if mean_depth > 0.0 {
            s.top_width / mean_depth
        } else {
            0.0
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Point;

    fn trapezoid() -> Profile {
        Profile::new(vec![
            Point::new(0.0, 4.0),
            Point::new(2.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(10.0, 4.0),
        ])
    }

    #[test]
    fn full_trapezoid() {
        let s = section_at(&trapezoid(), 4.0);
        assert!((s.area - 32.0).abs() < 1e-12);
        assert!((s.top_width - 10.0).abs() < 1e-12);
        assert!((s.wetted_perimeter - (6.0 + 2.0 * 20f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn partial_stage_clips_at_waterline() {
        let s = section_at(&trapezoid(), 2.0);
        // Top width 8 at stage 2, bottom 6.
        assert!((s.area - 14.0).abs() < 1e-12);
        assert!((s.top_width - 8.0).abs() < 1e-12);
        assert!((s.mean_depth() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn dry_profile_has_no_section() {
        let s = section_at(&trapezoid(), -1.0);
        assert_eq!(s, Section::default());
        assert_eq!(s.hydraulic_radius(), 0.0);
    }
}
