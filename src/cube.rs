//! Labeled cube and the dataset wrapper around it.

use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array1, Array3};

use crate::cast::cast_to_i16;
use crate::error::{ConvertError, Result};

/// Axis names, in storage order.
pub const DIM_NAMES: [&str; 3] = ["bands", "x", "y"];

/// Element types a cube can carry, named the way NetCDF/numpy tools print them.
pub trait SampleType: Copy + fmt::Display {
    fn dtype_name() -> &'static str;
}

impl SampleType for f64 {
    fn dtype_name() -> &'static str {
        "float64"
    }
}

impl SampleType for i16 {
    fn dtype_name() -> &'static str {
        "int16"
    }
}

/// A (bands, x, y) array whose band axis carries wavelength coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCube<T> {
    data: Array3<T>,
    dims: [String; 3],
    bands: Array1<f64>,
}

impl<T> LabeledCube<T> {
    /// Pair a (band, column, row) stack with one wavelength per band.
    ///
    /// Lengths must agree; a mismatch fails instead of truncating or padding.
    pub fn new(data: Array3<T>, bands: Array1<f64>) -> Result<Self> {
        let n_bands = data.dim().0;
        if bands.len() != n_bands {
            return Err(ConvertError::BandCountMismatch {
                bands: n_bands,
                wavelengths: bands.len(),
            });
        }
        Ok(LabeledCube {
            data,
            dims: DIM_NAMES.map(String::from),
            bands,
        })
    }

    /// Rebuild a cube with dimension names read from a file.
    pub(crate) fn with_dims(
        data: Array3<T>,
        bands: Array1<f64>,
        dims: [String; 3],
    ) -> Result<Self> {
        let mut cube = Self::new(data, bands)?;
        cube.dims = dims;
        Ok(cube)
    }

    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    pub fn dims(&self) -> &[String; 3] {
        &self.dims
    }

    pub fn band_coords(&self) -> &Array1<f64> {
        &self.bands
    }

    /// (bands, x, y)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Default `0..n` labels for an axis without explicit coordinates.
    pub fn positional_coords(&self, axis: usize) -> Array1<usize> {
        Array1::from_iter(0..self.data.shape()[axis])
    }

    /// Wrap the cube as the single data variable `name`.
    pub fn to_dataset(self, name: impl Into<String>) -> Dataset<T> {
        Dataset {
            name: name.into(),
            cube: self,
            attrs: BTreeMap::new(),
        }
    }
}

impl LabeledCube<f64> {
    pub fn astype_i16(&self) -> LabeledCube<i16> {
        LabeledCube {
            data: cast_to_i16(&self.data),
            dims: self.dims.clone(),
            bands: self.bands.clone(),
        }
    }
}

/// A labeled cube stored under a variable name, plus global attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    name: String,
    cube: LabeledCube<T>,
    attrs: BTreeMap<String, String>,
}

impl<T> Dataset<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cube(&self) -> &LabeledCube<T> {
        &self.cube
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }
}

impl Dataset<f64> {
    pub fn astype_i16(&self) -> Dataset<i16> {
        Dataset {
            name: self.name.clone(),
            cube: self.cube.astype_i16(),
            attrs: self.attrs.clone(),
        }
    }
}

const PREVIEW: usize = 4;

fn preview<I, V>(values: I, len: usize) -> String
where
    I: IntoIterator<Item = V>,
    V: fmt::Display,
{
    let mut shown: Vec<String> = values
        .into_iter()
        .take(PREVIEW)
        .map(|v| v.to_string())
        .collect();
    if len > PREVIEW {
        shown.push("...".to_string());
    }
    shown.join(" ")
}

impl<T: SampleType> fmt::Display for Dataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = &self.cube.dims;
        let (nb, nx, ny) = self.cube.shape();
        let bands = &self.cube.bands;
        let data = &self.cube.data;

        writeln!(f, "Dataset")?;
        writeln!(
            f,
            "Dimensions:  ({}: {}, {}: {}, {}: {})",
            dims[0], nb, dims[1], nx, dims[2], ny
        )?;
        writeln!(f, "Coordinates:")?;
        writeln!(
            f,
            "  * {:<8} ({}) float64 {}",
            dims[0],
            dims[0],
            preview(bands.iter().map(|w| format!("{w:.3}")), bands.len())
        )?;
        writeln!(f, "Dimensions without coordinates: {}, {}", dims[1], dims[2])?;
        writeln!(f, "Data variables:")?;
        write!(
            f,
            "    {:<8} ({}, {}, {}) {} {}",
            self.name,
            dims[0],
            dims[1],
            dims[2],
            T::dtype_name(),
            preview(data.iter(), data.len())
        )?;
        if !self.attrs.is_empty() {
            write!(f, "\nAttributes:")?;
            for (key, value) in &self.attrs {
                write!(f, "\n    {key}: {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    fn cube() -> LabeledCube<f64> {
        let data = Array::from_iter((0..12).map(f64::from)).into_shape((3, 2, 2)).unwrap();
        LabeledCube::new(data, array![450.0, 532.0, 660.0]).unwrap()
    }

    #[test]
    fn bands_axis_carries_wavelengths() {
        let cube = cube();
        assert_eq!(cube.dims(), &["bands", "x", "y"].map(String::from));
        assert_eq!(cube.band_coords(), &array![450.0, 532.0, 660.0]);
        assert_eq!(cube.shape(), (3, 2, 2));
        assert_eq!(cube.positional_coords(1), array![0usize, 1]);
    }

    #[test]
    fn mismatched_wavelengths_fail() {
        let data = Array3::<f64>::zeros((3, 2, 2));
        let err = LabeledCube::new(data, array![450.0, 532.0]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::BandCountMismatch {
                bands: 3,
                wavelengths: 2
            }
        ));
    }

    #[test]
    fn astype_keeps_labels() {
        let mut ds = cube().to_dataset("mapping");
        ds.set_attr("source", "Schm01.tif");
        let cast = ds.astype_i16();

        assert_eq!(cast.name(), "mapping");
        assert_eq!(cast.cube().band_coords(), ds.cube().band_coords());
        assert_eq!(cast.cube().dims(), ds.cube().dims());
        assert_eq!(cast.cube().data()[[2, 1, 1]], 11i16);
        assert_eq!(cast.attrs().get("source").map(String::as_str), Some("Schm01.tif"));
    }

    #[test]
    fn summary_before_cast_is_float64() {
        let mut ds = cube().to_dataset("mapping");
        ds.set_attr("source", "Schm01.tif");
        let summary = ds.to_string();
        assert!(summary.contains("mapping  (bands, x, y) float64 0 1 2 3 ..."));
        assert!(summary.contains("Dimensions without coordinates: x, y"));
        assert!(summary.ends_with("Attributes:\n    source: Schm01.tif"));
    }

    #[test]
    fn summary_lists_dims_and_dtype() {
        let summary = cube().to_dataset("mapping").astype_i16().to_string();
        assert!(summary.contains("Dimensions:  (bands: 3, x: 2, y: 2)"));
        assert!(summary.contains("* bands"));
        assert!(summary.contains("450.000 532.000 660.000"));
        assert!(summary.contains("mapping  (bands, x, y) int16 0 1 2 3 ..."));
    }
}
