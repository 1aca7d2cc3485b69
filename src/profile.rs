use serde::{Deserialize, Serialize};

/// Station/elevation pair. Station grows left to right across the section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub station: f64,
    pub elevation: f64,
}

impl Point {
    #[inline]
    pub const fn new(station: f64, elevation: f64) -> Self {
        Self { station, elevation }
    }
}

/// Ordered station/elevation series. Used for both the surveyed ground
/// and the design result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    pub points: Vec<Point>,
}

impl Profile {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (first, last) station, or None for an empty profile.
    pub fn station_range(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => Some((a.station, b.station)),
            _ => None,
        }
    }

    /// Index of the first point whose station is not greater than its
    /// predecessor's.
    pub fn first_non_increasing(&self) -> Option<usize> {
        self.points
            .windows(2)
            .position(|w| !(w[1].station > w[0].station))
            .map(|i| i + 1)
    }

    /// Index of the first point whose station is less than its predecessor's.
    /// Ties are allowed.
    pub fn first_decreasing(&self) -> Option<usize> {
        self.points
            .windows(2)
            .position(|w| !(w[1].station >= w[0].station))
            .map(|i| i + 1)
    }

    pub fn is_strictly_monotonic(&self) -> bool {
        self.first_non_increasing().is_none()
    }

    /// Linear interpolation of elevation at `station`. None outside the
    /// profile's station domain. At a vertical tie the first point wins.
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        let (lo, hi) = self.station_range()?;
        if station < lo || station > hi {
            return None;
        }
        if let Some(p) = self.points.iter().find(|p| p.station == station) {
            return Some(p.elevation);
        }
        self.points.windows(2).find_map(|w| {
            let (a, b) = (w[0], w[1]);
            if a.station < station && station < b.station {
                let t = (station - a.station) / (b.station - a.station);
                Some(a.elevation + (b.elevation - a.elevation) * t)
            } else {
                None
            }
        })
    }

    /// Round every coordinate to `decimals` places, normalizing -0 to 0.
    pub fn rounded(&self, decimals: u32) -> Profile {
        let scale = 10f64.powi(decimals as i32);
        let round = |v: f64| {
            let r = (v * scale).round() / scale;
            if r == 0.0 { 0.0 } else { r }
        };
        Profile::new(
            self.points
                .iter()
                .map(|p| Point::new(round(p.station), round(p.elevation)))
                .collect(),
        )
    }
}

impl FromIterator<Point> for Profile {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Profile::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Station direction moving away from the thalweg.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Role of a design point in the channel template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Thalweg,
    InnerBermTop,
    FilletStart,
    BedToe,
    FilletEnd,
    Bankfull,
    BenchEnd,
    SecondStage,
    FloodplainEnd,
    ThirdStage,
    TieOut,
}

impl PointKind {
    pub fn description(self) -> &'static str {
        match self {
            PointKind::Thalweg => "Centerline",
            PointKind::InnerBermTop => "Top Innerberm (Point Bar)",
            PointKind::FilletStart => "Start of bed rounding",
            PointKind::BedToe => "Bottom of Bank",
            PointKind::FilletEnd => "End of bed rounding",
            PointKind::Bankfull => "Bankfull/Design",
            PointKind::BenchEnd => "End of bankfull/design bench",
            PointKind::SecondStage => "2nd Stage",
            PointKind::FloodplainEnd => "End of 3rd stage bench",
            PointKind::ThirdStage => "3rd Stage Top Bank",
            PointKind::TieOut => "Tie-out",
        }
    }

    fn stage_name(self) -> Option<&'static str> {
        match self {
            PointKind::InnerBermTop => Some("Inner Berm"),
            PointKind::Bankfull => Some("Bankfull"),
            PointKind::SecondStage => Some("2nd Stage"),
            PointKind::ThirdStage => Some("3rd Stage"),
            _ => None,
        }
    }
}

/// A design point with its role. `side` is None only for the thalweg.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignPoint {
    pub point: Point,
    pub side: Option<Side>,
    pub kind: PointKind,
}

impl DesignPoint {
    /// Table label such as "Left Bankfull" or "Thalweg"; empty for points
    /// that do not mark a stage.
    pub fn stage_label(&self) -> String {
        match (self.kind, self.side) {
            (PointKind::Thalweg, _) => "Thalweg".to_string(),
            (kind, Some(side)) => kind
                .stage_name()
                .map(|s| format!("{} {}", side.name(), s))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Assembled design template, station-ordered, with point roles kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignProfile {
    pub points: Vec<DesignPoint>,
}

impl DesignProfile {
    pub fn to_profile(&self) -> Profile {
        self.points.iter().map(|p| p.point).collect()
    }

    pub fn find(&self, side: Side, kind: PointKind) -> Option<&DesignPoint> {
        self.points
            .iter()
            .find(|p| p.side == Some(side) && p.kind == kind)
    }
}
