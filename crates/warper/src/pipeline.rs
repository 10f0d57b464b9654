use std::path::Path;

use warper_image::Image;
use warper_imgproc::flip::vertical_flip;
use warper_imgproc::parallel::{CancellationToken, ExecutionStrategy};
use warper_imgproc::warp::{warp_to_canvas, CanvasGeometry};
use warper_io::{read_image_rgba32f, write_image_rgba32f};
use warper_linalg::Mat3;

use crate::error::WarperError;

/// Runs the file-to-file stages around a single transform.
///
/// Images inside the pipeline are stored bottom-up: row 0 is the bottom row of the picture
/// as it appears in the file. [`Pipeline::ingest`] and [`Pipeline::emit`] flip on the way in
/// and out.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    strategy: ExecutionStrategy,
    cancel: Option<CancellationToken>,
}

impl Pipeline {
    /// Create a pipeline that resamples with the given strategy.
    pub fn new(strategy: ExecutionStrategy) -> Self {
        Self {
            strategy,
            cancel: None,
        }
    }

    /// Poll `token` while resampling and abort once it is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Reads an image file into bottom-up RGBA.
    pub fn ingest(&self, path: impl AsRef<Path>) -> Result<Image<f32, 4>, WarperError> {
        let path = path.as_ref();
        let image = read_image_rgba32f(path)?;
        log::info!("loaded {} ({})", path.display(), image.size());
        Ok(vertical_flip(&image)?)
    }

    /// Warps a bottom-up image by the accumulated transform.
    pub fn transform(
        &self,
        src: &Image<f32, 4>,
        m: &Mat3,
    ) -> Result<(Image<f32, 4>, CanvasGeometry), WarperError> {
        let (dst, canvas) = warp_to_canvas(src, m, self.strategy, self.cancel.as_ref())?;
        log::info!(
            "warped {} into {} with origin ({}, {})",
            src.size(),
            canvas.size,
            canvas.origin.x,
            canvas.origin.y
        );
        Ok((dst, canvas))
    }

    /// Writes a bottom-up image to a file, top row first.
    pub fn emit(
        &self,
        path: impl AsRef<Path>,
        image: &Image<f32, 4>,
    ) -> Result<(), WarperError> {
        let path = path.as_ref();
        write_image_rgba32f(path, &vertical_flip(image)?)?;
        log::info!("wrote {} ({})", path.display(), image.size());
        Ok(())
    }
}
