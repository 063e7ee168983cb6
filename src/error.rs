use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a conversion. There is no recovery: the first
/// error aborts the run before anything is written.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unrecognized image format for {path:?}: expected a .tif or .tiff file")]
    UnrecognizedFormat { path: PathBuf },

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode TIFF {path:?}: {source}")]
    Tiff {
        path: PathBuf,
        #[source]
        source: tiff::TiffError,
    },

    #[error("TIFF decoder panicked while reading {path:?}")]
    DecoderPanic { path: PathBuf },

    #[error("unsupported sample layout in {path:?} (page {page}): {detail}")]
    UnsupportedLayout {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    #[error(
        "page {page} of {path:?} is {found_width}x{found_height}, expected {width}x{height}"
    )]
    InconsistentPages {
        path: PathBuf,
        page: usize,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("failed to read spreadsheet {path:?}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("spreadsheet {path:?} has no worksheets")]
    NoWorksheet { path: PathBuf },

    #[error("non-numeric wavelength cell in {path:?} at row {row}: {value:?}")]
    NonNumericCell {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("spreadsheet {path:?} contains no wavelength values")]
    EmptyWavelengths { path: PathBuf },

    #[error("wavelength count {wavelengths} does not match band count {bands}")]
    BandCountMismatch { bands: usize, wavelengths: usize },

    #[error("netCDF error on {path:?}: {source}")]
    NetCdf {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    #[error("variable {name:?} not found in {path:?}")]
    MissingVariable { path: PathBuf, name: String },

    #[error("variable {name:?} in {path:?} has {rank} dimensions, expected 3")]
    UnexpectedRank {
        path: PathBuf,
        name: String,
        rank: usize,
    },

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
