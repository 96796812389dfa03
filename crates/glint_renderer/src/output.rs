//! Writing rendered images to disk.
//!
//! `.ppm` files are written as plain-text `P3`; every other extension is
//! handed to the `image` crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::info;
use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Write `image` to `path`, choosing the encoder from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == "ppm" {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        let format = ImageFormat::from_extension(&extension)
            .ok_or_else(|| OutputError::UnsupportedFormat(path.display().to_string()))?;
        let buffer = RgbImage::from_raw(image.width, image.height, image.to_rgb())
            .ok_or_else(|| OutputError::UnsupportedFormat("pixel buffer size mismatch".into()))?;
        buffer.save_with_format(path, format)?;
    }

    info!(
        "Wrote {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

/// Plain-text PPM: header, then one `r g b` triple per line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, out: &mut W) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;
    for [r, g, b] in image.to_rgb().chunks_exact(3).map(|c| [c[0], c[1], c[2]]) {
        writeln!(out, "{r} {g} {b}")?;
    }
    Ok(())
}
