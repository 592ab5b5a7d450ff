use std::fmt;

/// Whether a station was open when its snapshot was taken.
///
/// The API may omit the flag entirely, which is not the same as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Open,
    Closed,
    Unknown,
}

impl OpenState {
    /// Gauge encoding: 1.0 for open, 0.0 for closed, nothing for unknown.
    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            Self::Open => Some(1.0),
            Self::Closed => Some(0.0),
            Self::Unknown => None,
        }
    }
}

impl From<Option<bool>> for OpenState {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Open,
            Some(false) => Self::Closed,
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for OpenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "true"),
            Self::Closed => write!(f, "false"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Fuel grades reported by the price API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelGrade {
    Diesel,
    E5,
    E10,
}

impl FuelGrade {
    pub const ALL: [FuelGrade; 3] = [FuelGrade::Diesel, FuelGrade::E5, FuelGrade::E10];

    /// Field key used when writing a time-series point.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Diesel => "Diesel",
            Self::E5 => "E5",
            Self::E10 => "E10",
        }
    }
}

impl fmt::Display for FuelGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One fetched price/open-state record for a station.
///
/// Prices are `None` when the station does not sell the grade or the API
/// reported no price. `Some(0.0)` is a real (if unlikely) price.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSnapshot {
    pub id: String,
    pub name: String,
    pub place: String,
    pub brand: String,
    pub post_code: Option<String>,
    pub open: OpenState,
    pub diesel: Option<f64>,
    pub e5: Option<f64>,
    pub e10: Option<f64>,
}

impl StationSnapshot {
    /// Label used to key the scrape series: display name followed by place.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.place)
    }

    pub fn price(&self, grade: FuelGrade) -> Option<f64> {
        match grade {
            FuelGrade::Diesel => self.diesel,
            FuelGrade::E5 => self.e5,
            FuelGrade::E10 => self.e10,
        }
    }

    /// Present prices in `FuelGrade::ALL` order.
    pub fn prices(&self) -> impl Iterator<Item = (FuelGrade, f64)> + '_ {
        FuelGrade::ALL
            .into_iter()
            .filter_map(|grade| self.price(grade).map(|price| (grade, price)))
    }
}
