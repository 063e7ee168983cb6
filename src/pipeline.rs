//! The conversion itself: load, label, cast, write.

use std::path::PathBuf;

use chrono::Utc;
use indicatif::ProgressBar;
use log::{info, warn};

use crate::cast::{count_lossy, LossReport};
use crate::config::ConvertConfig;
use crate::cube::{Dataset, LabeledCube};
use crate::error::Result;
use crate::image::load_image_stack;
use crate::netcdf_io::write_dataset;
use crate::wavelengths::read_wavelengths;

/// What a finished conversion produced.
#[derive(Debug)]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub dataset: Dataset<i16>,
    /// Samples altered by the int16 cast.
    pub loss: LossReport,
}

/// Build the labeled float cube from the image stack and wavelength sheet.
///
/// Both inputs are read and checked against each other before anything is
/// written.
pub fn build_cube(config: &ConvertConfig, pb: &ProgressBar) -> Result<LabeledCube<f64>> {
    let image_path = config.image_path();
    pb.set_message(format!("Decoding {}", image_path.display()));
    let stack = load_image_stack(&image_path, pb)?;

    let wavelengths = read_wavelengths(&config.wavelengths_path())?;
    LabeledCube::new(stack, wavelengths)
}

/// Run the whole conversion described by `config`.
pub fn convert(config: &ConvertConfig, pb: &ProgressBar) -> Result<ConversionSummary> {
    let cube = build_cube(config, pb)?;
    let (bands, x, y) = cube.shape();
    info!("Labeled cube: bands = {}, x = {}, y = {}", bands, x, y);

    let mut dataset = cube.to_dataset(config.variable_name.as_str());
    dataset.set_attr("title", "LIBS mineralogy datacube");
    dataset.set_attr("source", config.image.display().to_string());
    dataset.set_attr("wavelength_source", config.wavelengths.display().to_string());
    dataset.set_attr(
        "history",
        format!(
            "{} created by {} {}",
            Utc::now().to_rfc3339(),
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
    );
    dataset.set_attr("Conventions", "CF-1.8");

    if config.print_summary {
        println!("{}", dataset);
    }

    let loss = count_lossy(dataset.cube().data());
    if !loss.is_lossless() {
        warn!(
            "Casting to int16 alters samples: {} saturated, {} fractional, {} NaN",
            loss.saturated, loss.fractional, loss.nan
        );
    }
    let dataset = dataset.astype_i16();

    if config.print_summary {
        println!("{}", dataset);
    }

    let output = config.output_path();
    pb.set_message(format!("Writing {}", output.display()));
    write_dataset(&output, &dataset)?;

    Ok(ConversionSummary {
        output,
        dataset,
        loss,
    })
}
