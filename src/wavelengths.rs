//! Wavelength sheet loading.
//!
//! The sheet is an ImageJ export: one wavelength per row in column A of the
//! first worksheet, usually under a header row. The header cell may be text
//! or blank (ImageJ Results tables leave A1 empty).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info};
use ndarray::Array1;

use crate::error::{ConvertError, Result};

/// Read column A of the first worksheet as wavelengths.
pub fn read_wavelengths(path: &Path) -> Result<Array1<f64>> {
    let sheet_err = |source| ConvertError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(sheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConvertError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(sheet_err)?;

    // The used range starts at its first non-empty cell, not necessarily A1
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let first_row = start_row as usize + 1;
    let column: Vec<&Data> = if start_col == 0 {
        range.rows().filter_map(|row| row.first()).collect()
    } else {
        debug!("Column A of {:?} is empty", path);
        Vec::new()
    };

    let wavelengths = parse_column(path, &column, first_row)?;
    info!("Read {} wavelengths from {:?}", wavelengths.len(), path);
    Ok(Array1::from(wavelengths))
}

fn parse_column(path: &Path, column: &[&Data], first_row: usize) -> Result<Vec<f64>> {
    // A leading non-numeric cell, blank included, is the column header
    let skip = match column.first() {
        Some(cell) if cell_to_f64(cell).is_none() => {
            debug!("Treating {:?} as the wavelength column header", cell);
            1
        }
        _ => 0,
    };

    // Trailing blank rows are not data
    let end = column
        .iter()
        .rposition(|cell| !matches!(cell, Data::Empty))
        .map(|i| i + 1)
        .unwrap_or(0);

    if end <= skip {
        return Err(ConvertError::EmptyWavelengths {
            path: path.to_path_buf(),
        });
    }

    column[skip..end]
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell_to_f64(cell).ok_or_else(|| ConvertError::NonNumericCell {
                path: path.to_path_buf(),
                row: first_row + skip + i,
                value: cell.to_string(),
            })
        })
        .collect()
}

/// One explicit numeric parse per cell.
fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
