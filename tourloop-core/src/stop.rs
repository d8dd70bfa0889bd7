//! Resolved locations visited by a tour.

use geo::Coord;

/// A geocoded location on the tour.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The stop's
/// position in the caller's list is its location index; index 0 is home.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourloop_core::Stop;
///
/// let stop = Stop::new("Port of Spain", Coord { x: -61.5167, y: 10.6667 });
///
/// assert_eq!(stop.label, "Port of Spain");
/// assert_eq!(stop.latitude(), 10.6667);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Human-readable label, usually the geocoder's display name.
    pub label: String,
    /// Geospatial position.
    pub location: Coord<f64>,
}

impl Stop {
    /// Construct a stop from a label and a position.
    pub fn new(label: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }

    /// Construct a stop from latitude and longitude in degrees.
    ///
    /// # Examples
    /// ```
    /// use tourloop_core::Stop;
    ///
    /// let stop = Stop::from_lat_lon("Home", 51.5, -0.1);
    /// assert_eq!(stop.location.x, -0.1);
    /// assert_eq!(stop.location.y, 51.5);
    /// ```
    pub fn from_lat_lon(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(
            label,
            Coord {
                x: longitude,
                y: latitude,
            },
        )
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

/// Split free-form text into one address per line.
///
/// Lines are trimmed and blank lines dropped; order is preserved so the first
/// address remains home.
///
/// # Examples
/// ```
/// use tourloop_core::parse_addresses;
///
/// let addresses = parse_addresses("  Home \n\n Stop 1\n");
/// assert_eq!(addresses, vec!["Home".to_string(), "Stop 1".to_string()]);
/// ```
#[must_use]
pub fn parse_addresses(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
