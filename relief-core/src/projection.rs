//! Local planar projection for regional lat/lon grids.
use nalgebra::Point2;

/// Metres per degree of latitude on the reference sphere
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Equirectangular projection around a fixed origin.
///
/// Longitude spacing is scaled by the cosine of a reference latitude, so
/// distances are only trustworthy over regional extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub meters_per_degree_lat: f64,
    pub meters_per_degree_lon: f64,
}

impl LocalProjection {
    pub fn new(origin_lat: f64, origin_lon: f64, reference_lat: f64) -> Self {
        Self {
            origin_lat,
            origin_lon,
            meters_per_degree_lat: METERS_PER_DEGREE,
            meters_per_degree_lon: METERS_PER_DEGREE * reference_lat.to_radians().cos(),
        }
    }

    /// Projection with its origin at the first sample of each axis and its
    /// longitude scale taken at the mean latitude.
    pub fn for_axes(latitudes: &[f64], longitudes: &[f64]) -> Self {
        let origin_lat = latitudes.first().copied().unwrap_or(0.0);
        let origin_lon = longitudes.first().copied().unwrap_or(0.0);
        let mean_lat = if latitudes.is_empty() {
            origin_lat
        } else {
            latitudes.iter().sum::<f64>() / latitudes.len() as f64
        };
        Self::new(origin_lat, origin_lon, mean_lat)
    }

    /// Project a coordinate to (east, north) metres from the origin
    pub fn project(&self, lat: f64, lon: f64) -> Point2<f64> {
        Point2::new(self.x(lon), self.y(lat))
    }

    pub fn x(&self, lon: f64) -> f64 {
        (lon - self.origin_lon) * self.meters_per_degree_lon
    }

    pub fn y(&self, lat: f64) -> f64 {
        (lat - self.origin_lat) * self.meters_per_degree_lat
    }
}
