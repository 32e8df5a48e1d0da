use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;

use crate::compositor::{Compositor, Pixels};
use crate::utils::{make_screenshot_path, write_ppm_rgba8};

use super::Session;

impl<C: Compositor> Session<C> {
    /// Saves the contents of the focused output to the working directory.
    pub fn screenshot(&mut self) {
        let _span = tracy_client::span!("Session::screenshot");

        let Some(output) = self.compositor.focused_output() else {
            return;
        };
        let Some(pixels) = self.compositor.output_pixels(output) else {
            warn!("error reading pixels of {output}");
            return;
        };

        match save_screenshot(&pixels) {
            Ok(path) => info!("saved screenshot to {path:?}"),
            Err(err) => warn!("error saving screenshot: {err:?}"),
        }
    }
}

fn save_screenshot(pixels: &Pixels) -> anyhow::Result<PathBuf> {
    let width = u32::try_from(pixels.size.w).context("negative width")?;
    let height = u32::try_from(pixels.size.h).context("negative height")?;

    let path = make_screenshot_path()?;
    let file = File::create(&path).with_context(|| format!("error creating {path:?}"))?;
    write_ppm_rgba8(BufWriter::new(file), width, height, &pixels.rgba)?;

    Ok(path)
}
