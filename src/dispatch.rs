//! # Print Dispatch
//!
//! Converts a composed canvas to 24-bit RGB (the only bitmap flavour the CUPS
//! image filter accepts from us), writes it to disk and hands the file to the
//! print spooler.

use crate::canvas::Canvas;
use crate::error::{LabelError, Result};
use image::{ImageFormat, RgbImage};
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// One-time printer setup: 300x600 dpi, graphics quality, normal density, label page size
pub const PRINTER_CONFIGURE_COMMAND: &[&str] = &[
    "lpoptions",
    "-o",
    "Resolution=300x600dpi",
    "-o",
    "DymoPrintQuality=Graphics",
    "-o",
    "DymoPrintDensity=Normal",
    "-o",
    "PageSize=w154h286",
];

/// Per-label print command, the bitmap path is appended
pub const PRINT_COMMAND: &[&str] = &["lp"];

/// Narrow interface to the external print subsystem
pub trait PrintSpooler {
    /// Apply the printer options. Issued once before the first label.
    fn configure_printer(&self) -> Result<()>;

    /// Queue `path` for printing, blocking until the spooler accepted it.
    fn print_file(&self, path: &Path) -> Result<()>;
}

/// Spooler backed by the CUPS command line tools
pub struct CupsSpooler {
    configure_command: Vec<String>,
    print_command: Vec<String>,
}

impl CupsSpooler {
    pub fn new() -> Self {
        Self::with_commands(PRINTER_CONFIGURE_COMMAND, PRINT_COMMAND)
    }

    fn with_commands(configure_command: &[&str], print_command: &[&str]) -> Self {
        Self {
            configure_command: configure_command.iter().map(|s| s.to_string()).collect(),
            print_command: print_command.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for CupsSpooler {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintSpooler for CupsSpooler {
    fn configure_printer(&self) -> Result<()> {
        run_command(&self.configure_command, None)
    }

    fn print_file(&self, path: &Path) -> Result<()> {
        run_command(&self.print_command, Some(path))
    }
}

fn run_command(command: &[String], file: Option<&Path>) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| LabelError::PrintCommandFailed("empty command line".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(file) = file {
        cmd.arg(file);
    }
    debug!("Running {:?}", cmd);

    let status = cmd
        .status()
        .map_err(|e| LabelError::PrintCommandFailed(format!("{}: {}", program, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(LabelError::PrintCommandFailed(format!(
            "{} exited with {}",
            program, status
        )))
    }
}

/// Drop the alpha channel, producing a packed 24-bit RGB image.
pub fn to_rgb24(canvas: &Canvas) -> Result<RgbImage> {
    let rgba = canvas.as_rgba();
    let data: Vec<u8> = rgba.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect();
    RgbImage::from_raw(rgba.width(), rgba.height(), data).ok_or_else(|| {
        LabelError::FormatConversionFailed(format!(
            "buffer does not match {}x{}",
            rgba.width(),
            rgba.height()
        ))
    })
}

/// Write a 24-bit BMP, overwriting any previous file.
pub fn save_bitmap(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Bmp)
        .map_err(|e| LabelError::FileWriteFailed(format!("{}: {}", path.display(), e)))
}

/// Convert and write the canvas without printing it
pub fn persist(canvas: &Canvas, output_path: &Path) -> Result<()> {
    let rgb = to_rgb24(canvas)?;
    save_bitmap(&rgb, output_path)?;
    info!("💾 Label saved to {}", output_path.display());
    Ok(())
}

/// Convert, write and print the canvas.
pub fn dispatch<S: PrintSpooler + ?Sized>(
    canvas: &Canvas,
    output_path: &Path,
    spooler: &S,
) -> Result<()> {
    persist(canvas, output_path)?;
    spooler.print_file(output_path)?;
    info!("🖨️  Label sent to printer");
    Ok(())
}
