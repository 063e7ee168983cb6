//! Image stack loading: one TIFF page per band.

use std::fs::File;
use std::io::Cursor;
use std::panic::AssertUnwindSafe;
use std::path::Path;

use indicatif::ProgressBar;
use log::{debug, info};
use memmap2::MmapOptions;
use ndarray::Array3;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;

use crate::error::{ConvertError, Result};

/// Extension check gating the whole conversion: `.tif` / `.tiff`, any case.
pub fn is_tiff_name(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

/// Load a stack and return it as (band, column, row).
pub fn load_image_stack(path: &Path, pb: &ProgressBar) -> Result<Array3<f64>> {
    if !is_tiff_name(path) {
        return Err(ConvertError::UnrecognizedFormat {
            path: path.to_path_buf(),
        });
    }

    let stack = read_stack(path, pb)?;
    let (bands, height, width) = stack.dim();
    info!(
        "Read {:?}: {} bands, height = {}, width = {}",
        path, bands, height, width
    );

    Ok(permute_band_col_row(stack))
}

/// Read every page of a TIFF into a (band, row, column) array.
///
/// The file is memory-mapped and decoded in one pass. Pages must be
/// single-channel and share the same dimensions.
pub fn read_stack(path: &Path, pb: &ProgressBar) -> Result<Array3<f64>> {
    let file = File::open(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // The decoder can panic on malformed IFDs
    let decoded =
        std::panic::catch_unwind(AssertUnwindSafe(|| decode_pages(path, &mmap[..], pb)));

    match decoded {
        Ok(result) => result,
        Err(_) => Err(ConvertError::DecoderPanic {
            path: path.to_path_buf(),
        }),
    }
}

fn decode_pages(path: &Path, bytes: &[u8], pb: &ProgressBar) -> Result<Array3<f64>> {
    let tiff_err = |source| ConvertError::Tiff {
        path: path.to_path_buf(),
        source,
    };

    let mut decoder = Decoder::new(Cursor::new(bytes))
        .map_err(tiff_err)?
        .with_limits(Limits::unlimited());

    // The first page fixes the size every other band must have
    let (stack_w, stack_h) = decoder.dimensions().map_err(tiff_err)?;
    let (stack_w, stack_h) = (stack_w as usize, stack_h as usize);

    let mut samples: Vec<f64> = Vec::new();
    let mut page = 0usize;

    loop {
        let (width, height) = decoder.dimensions().map_err(tiff_err)?;
        let (width, height) = (width as usize, height as usize);

        match decoder.colortype().map_err(tiff_err)? {
            ColorType::Gray(_) => {}
            other => {
                return Err(ConvertError::UnsupportedLayout {
                    path: path.to_path_buf(),
                    page,
                    detail: format!("expected single-channel grayscale, found {:?}", other),
                })
            }
        }

        if (width, height) != (stack_w, stack_h) {
            return Err(ConvertError::InconsistentPages {
                path: path.to_path_buf(),
                page,
                width: stack_w,
                height: stack_h,
                found_width: width,
                found_height: height,
            });
        }

        let page_samples = widen(decoder.read_image().map_err(tiff_err)?).ok_or_else(|| {
            ConvertError::UnsupportedLayout {
                path: path.to_path_buf(),
                page,
                detail: "unsupported sample format".to_string(),
            }
        })?;

        if page_samples.len() != width * height {
            return Err(ConvertError::UnsupportedLayout {
                path: path.to_path_buf(),
                page,
                detail: format!(
                    "got {} samples, expected {} for {}x{}",
                    page_samples.len(),
                    width * height,
                    width,
                    height
                ),
            });
        }

        samples.extend(page_samples);
        page += 1;
        pb.inc(1);
        debug!("Decoded page {} of {:?}", page, path);

        if !decoder.more_images() {
            break;
        }
        decoder.next_image().map_err(tiff_err)?;
    }

    Ok(Array3::from_shape_vec((page, stack_h, stack_w), samples)?)
}

/// Widen any integer or float sample buffer to `f64`.
fn widen(result: DecodingResult) -> Option<Vec<f64>> {
    let values = match result {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(values)
}

/// (band, row, column) -> (band, column, row), in standard layout.
pub fn permute_band_col_row<T: Clone>(stack: Array3<T>) -> Array3<T> {
    stack.permuted_axes([0, 2, 1]).as_standard_layout().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    #[test]
    fn tiff_names() {
        assert!(is_tiff_name(Path::new("Schm01.tif")));
        assert!(is_tiff_name(Path::new("dir/Schm01.TIFF")));
        assert!(!is_tiff_name(Path::new("Schm01.xtif")));
        assert!(!is_tiff_name(Path::new("Schm01.nc")));
        assert!(!is_tiff_name(Path::new("tif")));
    }

    #[test]
    fn permute_swaps_rows_and_columns() {
        // 2 bands, 3 rows, 4 columns
        let raw = Array::from_iter(0..24).into_shape((2, 3, 4)).unwrap();
        let permuted = permute_band_col_row(raw.clone());

        assert_eq!(permuted.dim(), (2, 4, 3));
        assert!(permuted.is_standard_layout());
        for b in 0..2 {
            for row in 0..3 {
                for col in 0..4 {
                    assert_eq!(permuted[[b, col, row]], raw[[b, row, col]]);
                }
            }
        }
    }

    #[test]
    fn widen_keeps_signed_and_float_values() {
        assert_eq!(
            widen(DecodingResult::I16(vec![-3, 7])),
            Some(vec![-3.0, 7.0])
        );
        assert_eq!(
            widen(DecodingResult::F32(vec![1.5, -0.25])),
            Some(vec![1.5, -0.25])
        );
    }

    #[test]
    fn non_tiff_extension_is_rejected_before_opening() {
        let err = load_image_stack(Path::new("/nonexistent/Schm01.png"), &ProgressBar::hidden())
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnrecognizedFormat { .. }));
    }
}
