use stencil::{
    image::Image,
    imgproc::filter::{convolve, kernels::Kernel3},
    io::{
        error::IoError,
        functional::{read_image_any, GenericImage},
        png::write_image_png_gray8,
    },
};

#[test]
fn decode_filter_encode_gray() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");

    #[rustfmt::skip]
    let src = Image::<u8, 1>::new(
        [3, 3].into(),
        vec![
            10, 20, 30,
            40, 50, 60,
            70, 80, 90,
        ],
    )?;
    write_image_png_gray8(&input, &src)?;

    let GenericImage::L8(decoded) = read_image_any(&input)? else {
        panic!("expected a grayscale image");
    };
    assert_eq!(decoded, src);

    let filtered = GenericImage::L8(convolve(&decoded, Kernel3::from_name("blur"), 2)?);
    filtered.write_png(&output)?;

    let GenericImage::L8(written) = read_image_any(&output)? else {
        panic!("expected a grayscale image");
    };
    assert_eq!(written.size(), src.size());
    assert_eq!(written.get_pixel(1, 1, 0)?, 50);
    assert_eq!(written.get_pixel(0, 0, 0)?, 23);

    Ok(())
}

#[test]
fn decode_filter_encode_keeps_alpha_layout() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");

    let src = GenericImage::Rgba8(Image::new(
        [6, 5].into(),
        (0..6 * 5 * 4).map(|v| (v * 7 % 256) as u8).collect(),
    )?);
    src.write_png(&input)?;

    let GenericImage::Rgba8(decoded) = read_image_any(&input)? else {
        panic!("expected an rgba image");
    };
    let filtered = convolve(&decoded, Kernel3::Identity, 3)?;
    GenericImage::Rgba8(filtered).write_png(&output)?;

    let written = read_image_any(&output)?;
    assert_eq!(written.num_channels(), 4);
    assert_eq!(written, src);

    Ok(())
}

#[test]
fn missing_input_is_reported() {
    let res = read_image_any("no-such-dir/no-such-image.png");
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
}
