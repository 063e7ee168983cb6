//! NetCDF-4 output of a cast dataset, and reading it back.

use std::path::Path;

use log::info;
use ndarray::{Array1, Array3};
use netcdf::AttributeValue;

use crate::cube::{Dataset, LabeledCube};
use crate::error::{ConvertError, Result};

/// Create (or overwrite) `path` holding `ds`.
///
/// Layout: dimensions `bands`, `x`, `y`; a `bands` coordinate variable with
/// the wavelengths; one `i16` data variable named after the dataset.
pub fn write_dataset(path: &Path, ds: &Dataset<i16>) -> Result<()> {
    let nc_err = |source| ConvertError::NetCdf {
        path: path.to_path_buf(),
        source,
    };

    let cube = ds.cube();
    let dims = cube.dims();
    let (nb, nx, ny) = cube.shape();

    let mut file = netcdf::create(path).map_err(nc_err)?;

    for (name, len) in dims.iter().zip([nb, nx, ny]) {
        file.add_dimension(name, len).map_err(nc_err)?;
    }

    {
        let mut bands = file.add_variable::<f64>(&dims[0], &[dims[0].as_str()]).map_err(nc_err)?;
        bands.put_attribute("long_name", "wavelength").map_err(nc_err)?;
        bands.put_attribute("units", "nm").map_err(nc_err)?;
        let coords: Vec<f64> = cube.band_coords().iter().copied().collect();
        bands.put_values(&coords, ..).map_err(nc_err)?;
    }

    {
        let dim_refs: Vec<&str> = dims.iter().map(String::as_str).collect();
        let mut var = file.add_variable::<i16>(ds.name(), &dim_refs).map_err(nc_err)?;
        let values: Vec<i16> = cube.data().iter().copied().collect();
        var.put_values(&values, ..).map_err(nc_err)?;
    }

    for (key, value) in ds.attrs() {
        file.add_attribute(key, value.as_str()).map_err(nc_err)?;
    }

    info!(
        "Wrote {:?}: variable {:?} with shape ({}, {}, {})",
        path,
        ds.name(),
        nb,
        nx,
        ny
    );
    Ok(())
}

/// Open a file produced by [`write_dataset`] and rebuild the dataset `name`.
pub fn read_dataset(path: &Path, name: &str) -> Result<Dataset<i16>> {
    let nc_err = |source| ConvertError::NetCdf {
        path: path.to_path_buf(),
        source,
    };

    let file = netcdf::open(path).map_err(nc_err)?;
    let var = file
        .variable(name)
        .ok_or_else(|| ConvertError::MissingVariable {
            path: path.to_path_buf(),
            name: name.to_string(),
        })?;

    let var_dims = var.dimensions();
    if var_dims.len() != 3 {
        return Err(ConvertError::UnexpectedRank {
            path: path.to_path_buf(),
            name: name.to_string(),
            rank: var_dims.len(),
        });
    }
    let dims: [String; 3] = [0, 1, 2].map(|i| var_dims[i].name().to_string());
    let shape = (var_dims[0].len(), var_dims[1].len(), var_dims[2].len());

    let values = var.get_values::<i16, _>(..).map_err(nc_err)?;
    let data = Array3::from_shape_vec(shape, values)?;

    let bands_var = file
        .variable(&dims[0])
        .ok_or_else(|| ConvertError::MissingVariable {
            path: path.to_path_buf(),
            name: dims[0].clone(),
        })?;
    let bands = Array1::from(bands_var.get_values::<f64, _>(..).map_err(nc_err)?);

    let mut ds = LabeledCube::with_dims(data, bands, dims)?.to_dataset(name);
    for attr in file.attributes() {
        if let AttributeValue::Str(value) = attr.value().map_err(nc_err)? {
            ds.set_attr(attr.name().to_string(), value);
        }
    }
    Ok(ds)
}
