// src/main.rs
use anyhow::{anyhow, bail, Context, Result};
use env_logger::{Builder, Env};
use indicatif::{ProgressBar, ProgressStyle};
use libs_datacube::netcdf_io::read_dataset;
use libs_datacube::{convert, ConvertConfig};
use log::info;
use rayon::ThreadPoolBuilder;
use std::{path::PathBuf, time::Duration, time::Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "datacube_converter",
    about = "Convert a LIBS TIFF image stack and its wavelength sheet into a NetCDF datacube"
)]
struct Opt {
    /// Directory that relative input and output names resolve against
    #[structopt(short = "d", long = "data-dir", parse(from_os_str), default_value = ".")]
    data_dir: PathBuf,

    /// Multi-page TIFF stack, one page per band
    #[structopt(short = "i", long = "image", parse(from_os_str), default_value = "Schm01.tif")]
    image: PathBuf,

    /// Spreadsheet with one wavelength per band in its first column
    #[structopt(
        short = "w",
        long = "wavelengths",
        parse(from_os_str),
        default_value = "Wavelengths_schm01.tif_from_imageJ.xlsx"
    )]
    wavelengths: PathBuf,

    /// NetCDF file to create (overwritten if present)
    #[structopt(short = "o", long = "output", parse(from_os_str), default_value = "Schm01.nc")]
    output: PathBuf,

    /// Name of the data variable
    #[structopt(short = "v", long = "var-name", default_value = "mapping")]
    var_name: String,

    /// Number of threads used for the int16 cast
    #[structopt(short = "n", long = "num-threads", default_value = "4")]
    num_threads: usize,

    /// Do not print the dataset summaries
    #[structopt(short = "q", long = "quiet")]
    quiet: bool,

    /// Re-open the written file and check it against the converted dataset
    #[structopt(long = "verify")]
    verify: bool,
}

impl From<&Opt> for ConvertConfig {
    fn from(opt: &Opt) -> Self {
        ConvertConfig {
            data_dir: opt.data_dir.clone(),
            image: opt.image.clone(),
            wavelengths: opt.wavelengths.clone(),
            output: opt.output.clone(),
            variable_name: opt.var_name.clone(),
            print_summary: !opt.quiet,
        }
    }
}

fn main() -> Result<()> {
    let start_time = Instant::now();

    // Initialize env_logger
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();
    builder.init();

    let opt = Opt::from_args();

    ThreadPoolBuilder::new()
        .num_threads(opt.num_threads)
        .build_global()
        .map_err(|e| anyhow!("Failed to build thread pool: {:?}", e))?;

    let config = ConvertConfig::from(&opt);
    info!("Starting datacube_converter...");
    info!("Data dir: {:?}", config.data_dir);
    info!("Image: {:?}", config.image_path());
    info!("Wavelengths: {:?}", config.wavelengths_path());
    info!("Output: {:?}", config.output_path());
    info!("Num threads: {}", opt.num_threads);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {spinner} {pos} pages {msg}")
            .context("invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let summary = convert(&config, &pb)
        .with_context(|| format!("converting {:?}", config.image_path()))?;
    pb.finish_with_message("done");

    if opt.verify {
        let reread = read_dataset(&summary.output, summary.dataset.name())
            .with_context(|| format!("re-reading {:?}", summary.output))?;
        if reread.cube() != summary.dataset.cube() {
            bail!("{:?} does not match the converted dataset", summary.output);
        }
        info!("Verified {:?}", summary.output);
    }

    let elapsed = start_time.elapsed();
    info!("All done! Conversion completed in {:.2} seconds", elapsed.as_secs_f64());
    info!("Output in {:?}", summary.output);

    Ok(())
}
