use std::path::{Path, PathBuf};

/// Image stack converted when nothing else is given.
pub const DEFAULT_IMAGE: &str = "Schm01.tif";
/// ImageJ export holding one wavelength per band.
pub const DEFAULT_WAVELENGTHS: &str = "Wavelengths_schm01.tif_from_imageJ.xlsx";
pub const DEFAULT_OUTPUT: &str = "Schm01.nc";
pub const DEFAULT_VARIABLE: &str = "mapping";

/// Inputs and outputs of one conversion.
///
/// Relative file names resolve against `data_dir`; absolute ones are used as
/// given. Nothing touches the process working directory.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub data_dir: PathBuf,
    pub image: PathBuf,
    pub wavelengths: PathBuf,
    pub output: PathBuf,
    pub variable_name: String,
    /// Print the dataset summary before and after the cast.
    pub print_summary: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            data_dir: PathBuf::from("."),
            image: PathBuf::from(DEFAULT_IMAGE),
            wavelengths: PathBuf::from(DEFAULT_WAVELENGTHS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            variable_name: DEFAULT_VARIABLE.to_string(),
            print_summary: true,
        }
    }
}

impl ConvertConfig {
    /// Defaults rooted at `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        ConvertConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn image_path(&self) -> PathBuf {
        self.resolve(&self.image)
    }

    pub fn wavelengths_path(&self) -> PathBuf {
        self.resolve(&self.wavelengths)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    fn resolve(&self, name: &Path) -> PathBuf {
        // `join` replaces the base when `name` is absolute
        self.data_dir.join(name)
    }
}
