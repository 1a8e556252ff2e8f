//! End-to-end pipeline tests over temporary directories.

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use img_parts::{png::Png, Bytes, ImageEXIF};
use lumina_processing::{
    Decoder, Fingerprinter, ImagePipeline, ProcessError, ThumbTarget, WatermarkSpec, FontRegistry,
    DOWNLOAD_MAX_EDGE,
};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Minimal little-endian TIFF blob carrying only an orientation tag,
/// suitable for a PNG eXIf chunk.
fn exif_orientation_blob(orientation: u16) -> Vec<u8> {
    let mut blob = Vec::new();
    blob.extend_from_slice(b"II*\0"); // byte order + magic
    blob.extend_from_slice(&8u32.to_le_bytes()); // offset of IFD0
    blob.extend_from_slice(&1u16.to_le_bytes()); // one entry
    blob.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
    blob.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    blob.extend_from_slice(&1u32.to_le_bytes()); // count
    blob.extend_from_slice(&orientation.to_le_bytes());
    blob.extend_from_slice(&[0, 0]); // value padding
    blob.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
    blob
}

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn png_bytes_with_orientation(img: &RgbaImage, orientation: u16) -> Vec<u8> {
    let mut png = Png::from_bytes(Bytes::from(png_bytes(img))).unwrap();
    png.set_exif(Some(Bytes::from(exif_orientation_blob(orientation))));
    png.encoder().bytes().to_vec()
}

fn test_photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 7 % 256) as u8,
            (y * 13 % 256) as u8,
            ((x + y) * 3 % 256) as u8,
            255,
        ])
    })
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn fingerprint_ignores_metadata_differences() {
    let dir = tempfile::tempdir().unwrap();
    let photo = test_photo(64, 48);

    // Same pixels, one file with an extra (identity) EXIF payload.
    let plain = write_file(dir.path(), "plain.png", &png_bytes(&photo));
    let tagged = write_file(
        dir.path(),
        "tagged.png",
        &png_bytes_with_orientation(&photo, 1),
    );
    assert_ne!(
        std::fs::read(&plain).unwrap(),
        std::fs::read(&tagged).unwrap(),
        "the two files must differ at the byte level for this test to mean anything"
    );

    let a = ImagePipeline::fingerprint_file(&plain).unwrap();
    let b = ImagePipeline::fingerprint_file(&tagged).unwrap();
    assert_eq!(a, b);
}

#[test]
fn orientation_tag_is_read_and_normalized_away() {
    let dir = tempfile::tempdir().unwrap();
    let upright = test_photo(64, 48);

    // Orientation 6 means the stored pixels need a 90 CW rotation to
    // display upright, so store the upright image rotated 90 CCW.
    let rotated = imageops::rotate270(&upright);
    let upright_path = write_file(dir.path(), "upright.png", &png_bytes(&upright));
    let rotated_path = write_file(
        dir.path(),
        "rotated.png",
        &png_bytes_with_orientation(&rotated, 6),
    );

    assert_eq!(
        Decoder::read_exif_orientation(&std::fs::read(&rotated_path).unwrap()),
        6
    );

    // After normalization the two sources fingerprint identically.
    let a = ImagePipeline::fingerprint_file(&upright_path).unwrap();
    let b = ImagePipeline::fingerprint_file(&rotated_path).unwrap();
    assert_eq!(a, b);

    // Before normalization they do not.
    let raw_rotated = Fingerprinter::of_pixels(&rotated);
    let raw_upright = Fingerprinter::of_pixels(&upright);
    assert_ne!(raw_rotated, raw_upright);
}

#[test]
fn full_invocation_fingerprints_and_writes_thumbs() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "source.png", &png_bytes(&test_photo(1600, 1200)));

    let targets = vec![
        ThumbTarget::new(dir.path().join("t800.png"), 800, 800),
        ThumbTarget::new(dir.path().join("t400.jpg"), 400, 400),
        ThumbTarget::cropped(dir.path().join("t150.png"), 150, 150),
    ];

    let result = ImagePipeline::generate_fingerprint_and_thumbnails(&source, &targets).unwrap();
    assert!(result.fingerprint.is_some());
    assert!(result.thumbs_written);
    assert!(result.failures.is_empty());

    let t800 = image::open(dir.path().join("t800.png")).unwrap();
    assert_eq!((t800.width(), t800.height()), (800, 600));
    let t150 = image::open(dir.path().join("t150.png")).unwrap();
    assert_eq!((t150.width(), t150.height()), (150, 150));

    // The fingerprint matches the standalone hash path.
    let standalone = ImagePipeline::fingerprint_file(&source).unwrap();
    assert_eq!(result.fingerprint.unwrap(), standalone);
}

#[test]
fn unwritable_target_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "source.png", &png_bytes(&test_photo(800, 600)));

    let targets = vec![
        ThumbTarget::new(dir.path().join("first.png"), 400, 400),
        ThumbTarget::new(dir.path().join("missing-dir/second.png"), 300, 300),
        ThumbTarget::new(dir.path().join("third.png"), 200, 200),
    ];

    let result = ImagePipeline::generate_fingerprint_and_thumbnails(&source, &targets).unwrap();
    assert!(result.thumbs_written);
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0]
        .dest
        .to_string_lossy()
        .contains("second.png"));
    assert!(dir.path().join("first.png").exists());
    assert!(dir.path().join("third.png").exists());
}

#[test]
fn undecodable_source_aborts_before_any_target() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "broken.jpg", b"not an image at all");
    let dest = dir.path().join("never.png");

    let result = ImagePipeline::generate_fingerprint_and_thumbnails(
        &source,
        &[ThumbTarget::new(&dest, 100, 100)],
    );
    assert!(matches!(result, Err(ProcessError::Decode { .. })));
    assert!(!dest.exists());
}

#[test]
fn repeated_runs_produce_byte_identical_thumbs() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "source.png", &png_bytes(&test_photo(1600, 1200)));

    let read_all = |run: &str| -> Vec<Vec<u8>> {
        let targets = vec![
            ThumbTarget::new(dir.path().join(format!("{run}-800.png")), 800, 800),
            ThumbTarget::new(dir.path().join(format!("{run}-400.jpg")), 400, 400),
            ThumbTarget::cropped(dir.path().join(format!("{run}-150.png")), 150, 150),
        ];
        let result = ImagePipeline::generate_fingerprint_and_thumbnails(&source, &targets).unwrap();
        assert!(result.failures.is_empty());
        targets
            .iter()
            .map(|t| std::fs::read(&t.dest).unwrap())
            .collect()
    };

    assert_eq!(read_all("one"), read_all("two"));
}

#[test]
fn download_transform_caps_the_long_edge_and_keeps_the_format() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "large.png", &png_bytes(&test_photo(3200, 2400)));

    let mut sink = Vec::new();
    ImagePipeline::render_download_transform(
        &source,
        &mut sink,
        &WatermarkSpec::none(),
        &FontRegistry::new(),
    )
    .unwrap();

    assert_eq!(image::guess_format(&sink).unwrap(), ImageFormat::Png);
    let rendition = image::load_from_memory(&sink).unwrap();
    assert_eq!(rendition.width().max(rendition.height()), DOWNLOAD_MAX_EDGE);
}

#[test]
fn download_transform_does_not_upscale_small_sources() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "small.png", &png_bytes(&test_photo(320, 240)));

    let mut sink = Vec::new();
    ImagePipeline::render_download_transform(
        &source,
        &mut sink,
        &WatermarkSpec::none(),
        &FontRegistry::new(),
    )
    .unwrap();

    let rendition = image::load_from_memory(&sink).unwrap();
    assert_eq!((rendition.width(), rendition.height()), (320, 240));
}

#[test]
fn download_transform_with_missing_font_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "photo.png", &png_bytes(&test_photo(800, 600)));

    let mut sink = Vec::new();
    let result = ImagePipeline::render_download_transform(
        &source,
        &mut sink,
        &WatermarkSpec::new("© lumina"),
        &FontRegistry::new(),
    );

    assert!(matches!(result, Err(ProcessError::FontMissing { .. })));
    assert!(sink.is_empty());
}
