//! Spherical Mercator projection anchored at a fixed geographic origin.
//!
//! Converts between (latitude, longitude) and local planar meters so that
//! downloaded map geometry and the voxel grid share one coordinate frame.

/// Mean Earth circumference at the equator, in meters.
const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

/// Projection between geographic coordinates and local (y, x) meters.
///
/// The origin is fixed at construction; both fields are immutable for the
/// lifetime of the projection.
#[derive(Clone, Copy, Debug)]
pub struct MapProjection {
    scale_factor: f64,
    origin_x: f64,
    origin_y: f64,
}

impl MapProjection {
    /// Create a projection centered on `(origin_lat, origin_lon)`.
    ///
    /// The Mercator plane is scaled by the Earth circumference at the origin
    /// latitude, so distances near the origin are approximately metric.
    pub fn new(origin_lat: f64, origin_lon: f64) -> Self {
        let scale_factor = earth_circumference(origin_lat);
        Self {
            scale_factor,
            origin_x: lon_to_x(origin_lon) * scale_factor,
            origin_y: lat_to_y(origin_lat) * scale_factor,
        }
    }

    /// Project geographic coordinates to local `(y, x)` meters relative to
    /// the origin. Results are snapped to millimeter precision; this reduces
    /// geometry exceptions in downstream mesh tooling.
    pub fn to_yx(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = lon_to_x(lon) * self.scale_factor - self.origin_x;
        let y = lat_to_y(lat) * self.scale_factor - self.origin_y;
        ((y * 1000.0).round() / 1000.0, (x * 1000.0).round() / 1000.0)
    }

    /// Inverse projection: local `(y, x)` meters back to `(lat, lon)`.
    pub fn to_lat_lon(&self, y: f64, x: f64) -> (f64, f64) {
        (
            y_to_lat((y + self.origin_y) / self.scale_factor),
            x_to_lon((x + self.origin_x) / self.scale_factor),
        )
    }
}

/// Earth circumference at the given latitude, in meters.
fn earth_circumference(latitude: f64) -> f64 {
    EARTH_CIRCUMFERENCE * latitude.to_radians().cos()
}

/// Longitude to Mercator x in `[0, 1]`.
fn lon_to_x(longitude: f64) -> f64 {
    (longitude + 180.0) / 360.0
}

/// Mercator x in `[0, 1]` back to longitude.
fn x_to_lon(x: f64) -> f64 {
    360.0 * (x - 0.5)
}

/// Latitude to Mercator y in `[0, 1]`.
fn lat_to_y(latitude: f64) -> f64 {
    let sin_lat = latitude.to_radians().sin();
    ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * std::f64::consts::PI) + 0.5
}

/// Mercator y in `[0, 1]` back to latitude.
fn y_to_lat(y: f64) -> f64 {
    360.0 * ((y - 0.5) * 2.0 * std::f64::consts::PI).exp().atan() / std::f64::consts::PI - 90.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_zero() {
        let proj = MapProjection::new(52.52, 13.405);
        let (y, x) = proj.to_yx(52.52, 13.405);
        assert!(
            y.abs() < 1e-3 && x.abs() < 1e-3,
            "Origin should map to (0, 0), got ({y}, {x})"
        );
    }

    #[test]
    fn test_round_trip_near_origin() {
        let proj = MapProjection::new(48.8566, 2.3522);
        let (y, x) = proj.to_yx(48.86, 2.36);
        let (lat, lon) = proj.to_lat_lon(y, x);
        assert!((lat - 48.86).abs() < 1e-6, "lat round trip drifted: {lat}");
        assert!((lon - 2.36).abs() < 1e-6, "lon round trip drifted: {lon}");
    }

    #[test]
    fn test_east_is_positive_x() {
        let proj = MapProjection::new(0.0, 0.0);
        let (_, x_east) = proj.to_yx(0.0, 0.001);
        assert!(x_east > 0.0, "Moving east should increase x, got {x_east}");
    }

    #[test]
    fn test_north_is_positive_y() {
        let proj = MapProjection::new(0.0, 0.0);
        let (y_north, _) = proj.to_yx(0.001, 0.0);
        assert!(
            y_north > 0.0,
            "Moving north should increase y, got {y_north}"
        );
    }

    #[test]
    fn test_scale_is_metric_at_equator() {
        let proj = MapProjection::new(0.0, 0.0);
        // One degree of longitude at the equator is ~111.3 km.
        let (_, x) = proj.to_yx(0.0, 1.0);
        let expected = EARTH_CIRCUMFERENCE / 360.0;
        assert!(
            (x - expected).abs() < 1.0,
            "One degree east should be ~{expected} m, got {x}"
        );
    }

    #[test]
    fn test_millimeter_snapping() {
        let proj = MapProjection::new(40.0, -74.0);
        let (y, x) = proj.to_yx(40.001, -73.999);
        assert_eq!(y, (y * 1000.0).round() / 1000.0);
        assert_eq!(x, (x * 1000.0).round() / 1000.0);
    }
}
