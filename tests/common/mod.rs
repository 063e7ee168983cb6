//! Fixture writers shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use tiff::encoder::{colortype, TiffEncoder};

/// Write one Gray16 page per band; each band is row-major `height x width`.
pub fn write_u16_stack(path: &Path, width: u32, height: u32, bands: &[Vec<u16>]) {
    let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    for band in bands {
        encoder
            .write_image::<colortype::Gray16>(width, height, band)
            .unwrap();
    }
}

pub fn write_f32_stack(path: &Path, width: u32, height: u32, bands: &[Vec<f32>]) {
    let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    for band in bands {
        encoder
            .write_image::<colortype::Gray32Float>(width, height, band)
            .unwrap();
    }
}

pub fn write_rgb_image(path: &Path, width: u32, height: u32) {
    let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    let data = vec![0u8; (width * height * 3) as usize];
    encoder
        .write_image::<colortype::RGB8>(width, height, &data)
        .unwrap();
}

/// Band `b`, pixel `(row, col)` holds `b * 100 + row * width + col`.
pub fn ramp_bands(n_bands: usize, width: usize, height: usize) -> Vec<Vec<u16>> {
    (0..n_bands)
        .map(|b| {
            (0..width * height)
                .map(|i| (b * 100 + i) as u16)
                .collect()
        })
        .collect()
}

/// Wavelength sheet as ImageJ exports it: a text header over the values.
pub fn write_wavelength_sheet(path: &Path, header: Option<&str>, values: &[f64]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let mut row = 0u32;
    if let Some(header) = header {
        sheet.write_string(row, 0, header).unwrap();
        row += 1;
    }
    for value in values {
        sheet.write_number(row, 0, *value).unwrap();
        row += 1;
    }
    workbook.save(path).unwrap();
}

pub fn write_text_cells(path: &Path, cells: &[&str]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (row, cell) in cells.iter().enumerate() {
        sheet.write_string(row as u32, 0, *cell).unwrap();
    }
    workbook.save(path).unwrap();
}

/// Numeric cells at `(row, col)` plus text cells, for sheets laid out like
/// ImageJ Results tables.
pub fn write_cells(path: &Path, numbers: &[(u32, u16, f64)], text: &[(u32, u16, &str)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for &(row, col, value) in numbers {
        sheet.write_number(row, col, value).unwrap();
    }
    for &(row, col, value) in text {
        sheet.write_string(row, col, value).unwrap();
    }
    workbook.save(path).unwrap();
}
