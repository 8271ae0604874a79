pub mod constants;
pub mod error;
pub mod options;
pub mod types;

pub use constants::*;
pub use error::{SieveError, SieveResult};
pub use options::{AudioOptions, ImageOptions};
pub use types::{AudioSignal, Plane, Raster};
