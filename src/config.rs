//! # Compiled-in Configuration
//!
//! All layout, device and timing values live here. There is no configuration file:
//! each build variant gets its own constructor and [`Config::default`] picks the
//! one matching the current build.

use std::path::PathBuf;
use std::time::Duration;

/// Canvas height shared by both build variants
pub const CANVAS_HEIGHT: u32 = 640;

/// Where the composed label is written before printing
pub const OUTPUT_PATH: &str = "/tmp/Label.bmp";

/// GPIO line offsets on the Pi header
pub const BUTTON_LINE_OFFSET: u32 = 22;
pub const LED_LINE_OFFSET: u32 = 27;

/// Placement of the static picture on the label
#[derive(Clone, Debug, PartialEq)]
pub struct PictureConfig {
    pub path: PathBuf,
    pub x: i64,
    pub y: i64,
}

/// Label layout configuration
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in pixels (1140 desktop, 1200 embedded)
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Added to the horizontally centered text position
    pub text_x_offset: i32,
    /// TrueType font file, relative to the working directory
    pub font_path: PathBuf,
    /// Font size in points
    pub font_size: f32,
    /// Top edge of the date line
    pub date_y: i64,
    /// Top edge of the time line
    pub time_y: i64,
    /// Static picture, absent on the desktop build
    pub picture: Option<PictureConfig>,
}

/// GPIO wiring of the button and LED
#[derive(Clone, Debug, PartialEq)]
pub struct GpioConfig {
    pub chip_path: PathBuf,
    pub button_offset: u32,
    pub led_offset: u32,
    /// Consumer label shown by `gpioinfo`
    pub consumer: String,
    /// Sleep between two button reads
    pub poll_interval: Duration,
    /// Extra wait after the button is released
    pub settle_delay: Duration,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub layout: LayoutConfig,
    pub gpio: GpioConfig,
    /// Bitmap handed to the print command
    pub output_path: PathBuf,
}

impl Config {
    /// Desktop test build: wider margins, no picture
    pub fn desktop() -> Self {
        Config {
            layout: LayoutConfig {
                width: 1140,
                height: CANVAS_HEIGHT,
                text_x_offset: 0,
                font_path: PathBuf::from("Sansation_Regular.ttf"),
                font_size: 140.0,
                date_y: 150,
                time_y: 350,
                picture: None,
            },
            gpio: GpioConfig::default(),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }

    /// Embedded build with the physical button and printer
    pub fn embedded() -> Self {
        let mut config = Self::desktop();
        config.layout.width = 1200;
        config.layout.text_x_offset = 30;
        config.layout.picture = Some(PictureConfig {
            path: PathBuf::from("Picture.bmp"),
            x: 40,
            y: 10,
        });
        config
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        GpioConfig {
            chip_path: PathBuf::from("/dev/gpiochip0"),
            button_offset: BUTTON_LINE_OFFSET,
            led_offset: LED_LINE_OFFSET,
            consumer: "label-printer".to_string(),
            poll_interval: Duration::from_millis(50),
            settle_delay: Duration::from_millis(200),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        if cfg!(feature = "hardware") {
            Self::embedded()
        } else {
            Self::desktop()
        }
    }
}
