//! # Label Printer Core Library
//!
//! Everything needed to turn a button press into a printed date/time label on a
//! Raspberry Pi driving a CUPS label printer.
//!
//! ## Pipeline
//!
//! Data flows one way, once per press:
//!
//! 1. **Button**: [`button_loop::ButtonLoop`] polls the active-low button line
//! 2. **Compose**: [`composer::compose`] draws picture, date and time onto a [`canvas::Canvas`]
//! 3. **Convert**: [`dispatch::to_rgb24`] drops the alpha channel
//! 4. **Persist**: [`dispatch::save_bitmap`] writes `/tmp/Label.bmp`
//! 5. **Print**: [`dispatch::PrintSpooler::print_file`] hands the file to `lp`
//!
//! ## Build Variants
//!
//! - **Desktop** (default): one label is composed without the picture and saved, nothing printed
//! - **Embedded** (`hardware` feature): GPIO button, picture and printer, loops forever
//!
//! Resources acquired at startup live in a single [`station::LabelStation`] and are
//! released when it is dropped.

pub mod button_loop;
pub mod canvas;
pub mod composer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod station;
pub mod text;

pub use error::{LabelError, Result};

#[cfg(test)]
mod tests;
