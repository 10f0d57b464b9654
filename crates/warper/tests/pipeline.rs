use std::path::Path;

use image::{Rgb, RgbImage};
use warper::imgproc::parallel::ExecutionStrategy;
use warper::imgproc::warp::WarpError;
use warper::{CommandReader, Interpreter, Pipeline, WarperError};

const LEVELS: [u8; 6] = [0, 51, 102, 153, 204, 255];

fn write_pattern(path: &Path, width: u32, height: u32) -> Result<RgbImage, image::ImageError> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let i = (x + y * width) as usize;
        Rgb([LEVELS[i % 6], LEVELS[(i / 6) % 6], LEVELS[5 - i % 6]])
    });
    img.save(path)?;
    Ok(img)
}

fn warp_file(
    pipeline: &Pipeline,
    input: &Path,
    output: &Path,
    commands: &str,
) -> Result<(), WarperError> {
    let src = pipeline.ingest(input)?;
    let m = Interpreter::new().run(CommandReader::new(commands.as_bytes()), |_| {})?;
    let (dst, _) = pipeline.transform(&src, &m)?;
    pipeline.emit(output, &dst)
}

#[test]
fn test_identity_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");
    let expected = write_pattern(&input, 5, 3)?;

    warp_file(&Pipeline::default(), &input, &output, "d\n")?;

    let back = image::open(&output)?.to_rgb8();
    assert_eq!(back, expected);
    Ok(())
}

#[test]
fn test_scale_doubles_width() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");
    let src = write_pattern(&input, 5, 3)?;

    let pipeline = Pipeline::new(ExecutionStrategy::Serial);
    warp_file(&pipeline, &input, &output, "s 2 1\nd\n")?;

    let back = image::open(&output)?.to_rgba8();
    assert_eq!(back.dimensions(), (10, 3));
    for y in 0..3 {
        for x in 0..9 {
            let u = (x as f64 / 2.0).round() as u32;
            let Rgb([r, g, b]) = *src.get_pixel(u, y);
            assert_eq!(back.get_pixel(x, y).0, [r, g, b, 255]);
        }
        // samples past the right edge stay transparent black
        assert_eq!(back.get_pixel(9, y).0, [0, 0, 0, 0]);
    }
    Ok(())
}

#[test]
fn test_rotation_swaps_dimensions() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");
    write_pattern(&input, 5, 3)?;

    warp_file(&Pipeline::default(), &input, &output, "R 90 D")?;

    let back = image::open(&output)?;
    assert_eq!((back.width(), back.height()), (3, 5));
    Ok(())
}

#[test]
fn test_missing_input() {
    let res = Pipeline::default().ingest("does/not/exist.png");
    assert!(matches!(res, Err(WarperError::Io(_))));
}

#[test]
fn test_singular_transform_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");
    write_pattern(&input, 4, 4)?;

    let res = warp_file(&Pipeline::default(), &input, &output, "s 0 1 d");
    assert!(matches!(
        res,
        Err(WarperError::Warp(WarpError::SingularTransform { .. }))
    ));
    assert!(!output.exists());
    Ok(())
}
