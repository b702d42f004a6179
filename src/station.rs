//! Process-wide resources for printing labels.
//!
//! [`LabelStation`] owns everything acquired once at startup (font, picture,
//! spooler) and runs complete compose/dispatch cycles with it. Dropping the
//! station releases every resource.

use crate::canvas::Canvas;
use crate::composer::{self, Picture};
use crate::config::Config;
use crate::dispatch::{self, PrintSpooler};
use crate::error::Result;
use crate::text::{TextRenderer, TrueTypeRenderer};
use chrono::NaiveDateTime;
use log::{info, warn};

pub struct LabelStation<R, S> {
    config: Config,
    renderer: R,
    picture: Option<Picture>,
    spooler: S,
}

impl<S: PrintSpooler> LabelStation<TrueTypeRenderer, S> {
    /// Load the font and, when the layout has one, the static picture.
    pub fn open(config: Config, spooler: S) -> Result<Self> {
        let layout = &config.layout;
        let renderer = TrueTypeRenderer::load(&layout.font_path, layout.font_size)?;
        info!(
            "🔤 Loaded font {} at {}pt",
            layout.font_path.display(),
            layout.font_size
        );

        let picture = match &layout.picture {
            Some(picture_config) => {
                let picture = Picture::load(picture_config)?;
                info!(
                    "🖼️  Loaded picture {} ({}x{})",
                    picture_config.path.display(),
                    picture.width(),
                    picture.height()
                );
                Some(picture)
            }
            None => None,
        };

        Ok(Self::new(config, renderer, picture, spooler))
    }
}

impl<R: TextRenderer, S: PrintSpooler> LabelStation<R, S> {
    pub fn new(config: Config, renderer: R, picture: Option<Picture>, spooler: S) -> Self {
        Self {
            config,
            renderer,
            picture,
            spooler,
        }
    }

    pub fn spooler(&self) -> &S {
        &self.spooler
    }

    /// Send the one-time printer options. Failure is reported but not fatal.
    pub fn configure_printer(&self) {
        match self.spooler.configure_printer() {
            Ok(()) => info!("⚙️  Printer configured"),
            Err(e) => warn!("⚠️  Printer configuration failed, continuing: {}", e),
        }
    }

    /// Compose a label for `when` on a fresh canvas
    pub fn compose(&self, when: &NaiveDateTime) -> Result<Canvas> {
        let layout = &self.config.layout;
        let canvas = composer::new_canvas(layout)?;
        composer::compose(canvas, layout, self.picture.as_ref(), when, &self.renderer)
    }

    /// Compose and write the label without printing it
    pub fn save_label(&self, when: &NaiveDateTime) -> Result<()> {
        let canvas = self.compose(when)?;
        dispatch::persist(&canvas, &self.config.output_path)
    }

    /// One full compose and print cycle
    pub fn print_label(&self, when: &NaiveDateTime) -> Result<()> {
        let canvas = self.compose(when)?;
        dispatch::dispatch(&canvas, &self.config.output_path, &self.spooler)
    }
}
