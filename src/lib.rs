//! Convert a LIBS / hyperspectral TIFF image stack into a labeled NetCDF
//! datacube.
//!
//! ```text
//!  stack.tif ──► image ──► (bands, x, y) f64 ─┐
//!                                             ├─► cube ──► cast ──► netcdf_io ──► stack.nc
//!  wavelengths.xlsx ──► wavelengths ──────────┘
//! ```

pub mod cast;
pub mod config;
pub mod cube;
pub mod error;
pub mod image;
pub mod netcdf_io;
pub mod pipeline;
pub mod wavelengths;

pub use config::ConvertConfig;
pub use cube::{Dataset, LabeledCube, DIM_NAMES};
pub use error::{ConvertError, Result};
pub use pipeline::{build_cube, convert, ConversionSummary};
