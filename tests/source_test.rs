// Page source tests: document kinds, frame counting and progress reporting

use std::fs::File;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;
use tiff::encoder::{TiffEncoder, colortype};

use revview::error::RevviewError;
use revview::page::Page;
use revview::source::{LoadOptions, SourceKind, fit_within, open_source};

fn write_rgb_tiff(path: &Path, sizes: &[(u32, u32)]) {
    let mut file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(&mut file).unwrap();
    for (i, &(w, h)) in sizes.iter().enumerate() {
        let data = vec![(i * 40) as u8; (w * h * 3) as usize];
        encoder.write_image::<colortype::RGB8>(w, h, &data).unwrap();
    }
}

fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
        .save(path)
        .unwrap();
}

// ============================================================
// 1. Kind detection
// ============================================================

#[test]
fn test_kind_from_extension() {
    let kind = |p: &str| SourceKind::from_path(Path::new(p));
    assert_eq!(kind("a.pptx").unwrap(), SourceKind::PresentationExport);
    assert_eq!(kind("a.PPT").unwrap(), SourceKind::PresentationExport);
    assert_eq!(kind("scan.tif").unwrap(), SourceKind::MultiFrameImage);
    assert_eq!(kind("scan.TIFF").unwrap(), SourceKind::MultiFrameImage);
    assert_eq!(kind("page.png").unwrap(), SourceKind::MultiFrameImage);
    assert!(matches!(
        kind("notes.docx"),
        Err(RevviewError::UnsupportedFormat(_))
    ));
    assert!(matches!(kind("noext"), Err(RevviewError::UnsupportedFormat(_))));
}

#[test]
fn test_directory_is_slide_export() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        SourceKind::from_path(dir.path()).unwrap(),
        SourceKind::PresentationExport
    );
}

#[test]
fn test_supported_extensions_listed() {
    let exts = SourceKind::supported_extensions();
    for ext in ["pptx", "tif", "tiff", "png"] {
        assert!(exts.contains(&ext), "missing {ext}");
    }
}

#[test]
fn test_missing_path_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = open_source(&dir.path().join("absent.tif"), LoadOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, RevviewError::SourceNotFound(_)));
}

#[test]
fn test_unrecognised_file_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();
    let err = open_source(&path, LoadOptions::default()).err().unwrap();
    assert!(matches!(err, RevviewError::UnsupportedFormat(_)));
}

// ============================================================
// 2. Multi-frame images
// ============================================================

#[test]
fn test_tiff_frames_are_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.tif");
    write_rgb_tiff(&path, &[(30, 20), (30, 20), (16, 8)]);

    let mut source = open_source(&path, LoadOptions::default()).unwrap();
    assert_eq!(source.total(), 3);
    assert!(source.get_page(1).is_none(), "pages decode on load");

    let mut progress = Vec::new();
    source.load_pages(&mut |i| progress.push(i)).unwrap();
    assert_eq!(progress, vec![1, 2, 3]);

    let third = source.get_page(3).unwrap();
    assert_eq!((third.width(), third.height()), (16, 8));
    assert_eq!(third.channels(), 3);
    match source.get_page(2).unwrap() {
        Page::Rgb(img) => assert_eq!(img.get_pixel(0, 0).0, [40, 40, 40]),
        Page::Gray(_) => panic!("expected RGB"),
    }
    assert!(source.get_page(0).is_none());
    assert!(source.get_page(4).is_none());
}

#[test]
fn test_gray_tiff_stays_single_channel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gray.tiff");
    {
        let mut file = File::create(&path).unwrap();
        let mut encoder = TiffEncoder::new(&mut file).unwrap();
        encoder
            .write_image::<colortype::Gray8>(12, 10, &[99u8; 120])
            .unwrap();
    }

    let mut source = open_source(&path, LoadOptions::default()).unwrap();
    source.load_pages(&mut |_| {}).unwrap();
    assert_eq!(source.get_page(1).unwrap().shape(), (10, 12, 1));
}

#[test]
fn test_single_raster_image_is_one_page() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.png");
    write_png(&path, 40, 30);

    let mut source = open_source(&path, LoadOptions::default()).unwrap();
    assert_eq!(source.total(), 1);
    let mut progress = Vec::new();
    source.load_pages(&mut |i| progress.push(i)).unwrap();
    assert_eq!(progress, vec![1]);
    assert_eq!(source.get_page(1).unwrap().shape(), (30, 40, 3));
}

#[test]
fn test_corrupt_tiff_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.tif");
    std::fs::write(&path, b"II*\0garbage").unwrap();
    assert!(open_source(&path, LoadOptions::default()).is_err());
}

#[test]
fn test_oversized_pages_are_downscaled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.png");
    write_png(&path, 400, 100);

    let options = LoadOptions {
        max_page_size: (200, 200),
        ..LoadOptions::default()
    };
    let mut source = open_source(&path, options).unwrap();
    source.load_pages(&mut |_| {}).unwrap();
    let page = source.get_page(1).unwrap();
    assert_eq!((page.width(), page.height()), (200, 50));
}

#[test]
fn test_fit_within_keeps_small_images() {
    let img = image::DynamicImage::ImageRgb8(RgbImage::new(100, 50));
    let fitted = fit_within(img, (1920, 1080));
    assert_eq!((fitted.width(), fitted.height()), (100, 50));

    let tall = image::DynamicImage::ImageRgb8(RgbImage::new(100, 2160));
    let fitted = fit_within(tall, (1920, 1080));
    assert_eq!((fitted.width(), fitted.height()), (50, 1080));
}

// ============================================================
// 3. Slide exports
// ============================================================

#[test]
fn test_slide_folder_in_natural_order() {
    let dir = TempDir::new().unwrap();
    let deck = dir.path().join("deck");
    std::fs::create_dir(&deck).unwrap();
    // Width encodes the slide number.
    write_png(&deck.join("Slide10.PNG"), 10, 5);
    write_png(&deck.join("Slide2.PNG"), 2, 5);
    write_png(&deck.join("Slide1.PNG"), 1, 5);
    std::fs::write(deck.join("thumbs.db"), "x").unwrap();

    let mut source = open_source(&deck, LoadOptions::default()).unwrap();
    assert_eq!(source.total(), 3);
    let mut progress = Vec::new();
    source.load_pages(&mut |i| progress.push(i)).unwrap();
    assert_eq!(progress, vec![1, 2, 3]);

    let widths: Vec<u32> = (1..=3).map(|i| source.get_page(i).unwrap().width()).collect();
    assert_eq!(widths, vec![1, 2, 10]);
}

#[test]
fn test_deck_path_resolves_to_export_folder() {
    let dir = TempDir::new().unwrap();
    let deck_file = dir.path().join("review.pptx");
    std::fs::write(&deck_file, b"").unwrap();
    let folder = dir.path().join("review");
    std::fs::create_dir(&folder).unwrap();
    write_png(&folder.join("Slide1.png"), 8, 8);
    write_png(&folder.join("Slide2.png"), 8, 8);

    let source = open_source(&deck_file, LoadOptions::default()).unwrap();
    assert_eq!(source.total(), 2);
}

#[test]
fn test_deck_without_export_folder_is_not_found() {
    let dir = TempDir::new().unwrap();
    let deck_file = dir.path().join("lonely.pptx");
    std::fs::write(&deck_file, b"").unwrap();

    let err = open_source(&deck_file, LoadOptions::default()).err().unwrap();
    assert!(matches!(err, RevviewError::SourceNotFound(_)));
}
