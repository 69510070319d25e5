use stencil_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The source or destination image is invalid, or could not be allocated.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The worker threads could not be started.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
