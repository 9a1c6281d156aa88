use crate::prelude::Point;

const KM_PER_DEGREE: f64 = 111.32;
const CIRCLE_VERTICES: usize = 32;

/// Builds a closed 32-vertex polygon ring approximating a circle of
/// `radius_km` around `center`, in `[lon, lat]` coordinate order.
///
/// Equirectangular approximation: the kilometer radius converts to degrees
/// by dividing by 111.32 and the longitude delta is corrected by the cosine
/// of the origin latitude.
pub fn circle_ring(center: Point, radius_km: f64) -> Vec<[f64; 2]> {
    let radius_deg = radius_km / KM_PER_DEGREE;
    let lat_cos = center.lat.to_radians().cos();
    let mut ring = Vec::with_capacity(CIRCLE_VERTICES + 1);

    for i in 0..CIRCLE_VERTICES {
        let angle = (i as f64 / CIRCLE_VERTICES as f64) * 2.0 * std::f64::consts::PI;
        let lat = center.lat + radius_deg * angle.cos();
        let lon = center.lon + radius_deg * angle.sin() / lat_cos;
        ring.push([lon, lat]);
    }
    ring.push(ring[0]);
    ring
}
