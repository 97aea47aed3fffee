use serde::{Deserialize, Serialize};
use std::fmt;

/// Rider pickup point used when an order does not name one (Accra, central).
pub const DEFAULT_ORIGIN: GeoPoint = GeoPoint {
    lat: 5.6037,
    lng: -0.1870,
};

/// Drop-off point used when an order does not name one.
pub const DEFAULT_DESTINATION: GeoPoint = GeoPoint {
    lat: 5.6148,
    lng: -0.1731,
};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Component-wise linear interpolation: `self + (to - self) * fraction`.
    ///
    /// `fraction` is clamped to `[0, 1]`; the end points are returned exactly.
    pub fn lerp(self, to: GeoPoint, fraction: f64) -> GeoPoint {
        if fraction <= 0.0 {
            return self;
        }
        if fraction >= 1.0 {
            return to;
        }
        GeoPoint {
            lat: self.lat + (to.lat - self.lat) * fraction,
            lng: self.lng + (to.lng - self.lng) * fraction,
        }
    }

    /// Largest per-component difference, used for tolerance comparisons.
    pub fn distance_max(self, other: GeoPoint) -> f64 {
        (self.lat - other.lat).abs().max((self.lng - other.lng).abs())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

/// The fixed pair of points a delivery travels between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

impl Route {
    pub const fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
        }
    }

    pub fn position_at(&self, fraction: f64) -> GeoPoint {
        self.origin.lerp(self.destination, fraction)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, DEFAULT_DESTINATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_end_points_and_midpoint() {
        let route = Route::default();
        assert_eq!(route.position_at(0.0), DEFAULT_ORIGIN);
        assert_eq!(route.position_at(1.0), DEFAULT_DESTINATION);

        let mid = route.position_at(0.5);
        assert!(mid.distance_max(GeoPoint::new(5.60925, -0.18005)) < 1e-9);
    }

    #[test]
    fn test_lerp_clamps_fraction() {
        let route = Route::default();
        assert_eq!(route.position_at(-0.3), DEFAULT_ORIGIN);
        assert_eq!(route.position_at(1.7), DEFAULT_DESTINATION);
    }

    #[test]
    fn test_is_valid() {
        assert!(DEFAULT_ORIGIN.is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }
}
