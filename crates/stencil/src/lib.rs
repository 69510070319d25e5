#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use stencil_image as image;

#[doc(inline)]
pub use stencil_imgproc as imgproc;

#[doc(inline)]
pub use stencil_io as io;
