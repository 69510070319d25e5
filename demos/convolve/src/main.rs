use argh::FromArgs;
use std::{path::PathBuf, time::Instant};

use stencil::{
    imgproc::{
        filter::{convolve, kernels::Kernel3, FilterError},
        parallel,
    },
    io::{
        functional::{self as F, GenericImage},
        png::check_png_extension,
    },
};

#[derive(FromArgs)]
/// Apply a 3x3 convolution filter to an image.
///
/// Filters: edge, sharpen, blur, gauss, emboss, identity. Unknown names copy the image.
struct Args {
    /// path to the input image (png, jpeg, bmp or tga)
    #[argh(positional)]
    input: PathBuf,

    /// the filter to apply
    #[argh(positional, default = "String::from(\"identity\")")]
    filter: String,

    /// the number of worker threads
    #[argh(option, short = 't', default = "4")]
    threads: i64,

    /// path to the output png image
    #[argh(option, short = 'o', default = "PathBuf::from(\"output.png\")")]
    output: PathBuf,
}

fn filter_image(
    image: &GenericImage,
    kernel: Kernel3,
    num_threads: usize,
) -> Result<GenericImage, FilterError> {
    Ok(match image {
        GenericImage::L8(img) => GenericImage::L8(convolve(img, kernel, num_threads)?),
        GenericImage::La8(img) => GenericImage::La8(convolve(img, kernel, num_threads)?),
        GenericImage::Rgb8(img) => GenericImage::Rgb8(convolve(img, kernel, num_threads)?),
        GenericImage::Rgba8(img) => GenericImage::Rgba8(convolve(img, kernel, num_threads)?),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    // fail before decoding and filtering if the output cannot be written
    check_png_extension(&args.output)?;

    let kernel = Kernel3::from_name(&args.filter);
    if !Kernel3::is_known_name(&args.filter) {
        log::warn!("unknown filter '{}', using {}", args.filter, kernel);
    }

    let image = F::read_image_any(&args.input)?;
    let size = image.size();
    log::info!(
        "loaded {} ({}x{}, {} channels)",
        args.input.display(),
        size.width,
        size.height,
        image.num_channels()
    );

    let requested = args.threads.max(1) as usize;
    let num_threads = parallel::num_workers(size.height, requested);
    if num_threads as i64 != args.threads {
        log::warn!(
            "using {} threads instead of {} for {} rows",
            num_threads,
            args.threads,
            size.height
        );
    }

    let start = Instant::now();
    let filtered = filter_image(&image, kernel, num_threads)?;
    log::info!(
        "applied {} with {} threads in {:.3?}",
        kernel,
        num_threads,
        start.elapsed()
    );

    filtered.write_png(&args.output)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
