//! Relief Core - watertight solid meshes from elevation grids
//!
//! Takes a latitude/longitude elevation grid and produces a closed, colored
//! triangle mesh ready to be handed to a 3D-print exporter. The crate is
//! stateless: every build is a pure function of the grid and configuration.

pub mod colormap;
pub mod config;
pub mod decimate;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod projection;
pub mod solid;
pub mod transform;
pub mod validation;

// Re-export commonly used types
pub use colormap::{colormap, BASE_COLOR};
pub use config::{ExportUnit, MeshConfig};
pub use decimate::{plan, DecimationPlan};
pub use error::{ConfigError, GridError, GridResult};
pub use geometry::{BoundingBox, Mesh, Triangle, Vertex};
pub use grid::ElevationGrid;
pub use projection::LocalProjection;
pub use solid::{build_solid, build_solid_geometry, MeshBuffer, SurfaceStats};
pub use transform::{scale_positions, Transform};
pub use validation::is_watertight;
