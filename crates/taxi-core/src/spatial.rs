//! Spatial math: local east/north offsets, geodetic positions and headings.

use crate::models::Runway;

/// WGS-84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 semi-minor axis in meters.
pub const WGS84_B: f64 = 6_356_752.314245;

const POLE_EPSILON_DEG: f64 = 1e-9;

fn eccentricity_sq() -> f64 {
    1.0 - (WGS84_B * WGS84_B) / (WGS84_A * WGS84_A)
}

/// Meridian radius of curvature (M) at a latitude.
pub fn meridian_radius(lat_deg: f64) -> f64 {
    let e2 = eccentricity_sq();
    let sin_lat = lat_deg.to_radians().sin();
    let w = 1.0 - e2 * sin_lat * sin_lat;
    WGS84_A * (1.0 - e2) / w.powf(1.5)
}

/// Prime-vertical radius of curvature (N) at a latitude.
pub fn prime_vertical_radius(lat_deg: f64) -> f64 {
    let e2 = eccentricity_sq();
    let sin_lat = lat_deg.to_radians().sin();
    WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt()
}

fn at_pole(lat_deg: f64) -> bool {
    lat_deg.abs() >= 90.0 - POLE_EPSILON_DEG
}

/// Convert a local east/north offset in meters to a geodetic position.
///
/// First-order approximation with radii evaluated at `ref_lat`. At the poles
/// the eastward displacement has no defined longitude and is ignored.
///
/// # Returns
/// (lat, lon) in degrees
pub fn offset_to_geodetic(ref_lat: f64, ref_lon: f64, east_m: f64, north_m: f64) -> (f64, f64) {
    let lat = ref_lat + (north_m / meridian_radius(ref_lat)).to_degrees();
    if at_pole(ref_lat) {
        return (lat, ref_lon);
    }
    let lon_scale = prime_vertical_radius(ref_lat) * ref_lat.to_radians().cos();
    let lon = ref_lon + (east_m / lon_scale).to_degrees();
    (lat, lon)
}

/// Inverse of [`offset_to_geodetic`].
///
/// # Returns
/// (east_m, north_m) relative to the reference
pub fn geodetic_to_offset(ref_lat: f64, ref_lon: f64, lat: f64, lon: f64) -> (f64, f64) {
    let north_m = (lat - ref_lat).to_radians() * meridian_radius(ref_lat);
    if at_pole(ref_lat) {
        return (0.0, north_m);
    }
    let lon_scale = prime_vertical_radius(ref_lat) * ref_lat.to_radians().cos();
    let east_m = (lon - ref_lon).to_radians() * lon_scale;
    (east_m, north_m)
}

/// Normalize a heading to [0, 360).
pub fn normalize_heading(heading_deg: f64) -> f64 {
    let h = heading_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Unit vector (east, north) for a heading in degrees true.
pub fn heading_unit_vector(heading_deg: f64) -> (f64, f64) {
    let rad = heading_deg.to_radians();
    (rad.sin(), rad.cos())
}

/// Heading of a local displacement, 0 = north, 90 = east.
pub fn bearing_deg(d_east: f64, d_north: f64) -> f64 {
    normalize_heading(d_east.atan2(d_north).to_degrees())
}

impl Runway {
    /// Threshold of the primary direction: the center displaced by half the
    /// length opposite the heading.
    ///
    /// # Returns
    /// (lat, lon) in degrees
    pub fn threshold(&self) -> (f64, f64) {
        let (dir_e, dir_n) = heading_unit_vector(self.heading_deg);
        let half = self.length_m / 2.0;
        offset_to_geodetic(self.lat, self.lon, -dir_e * half, -dir_n * half)
    }
}
