use comic_impose::*;
use image::{Luma, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const WIDTH: u32 = 100;
const HEIGHT: u32 = 150;

struct Workspace {
    _dir: TempDir,
    processed: PathBuf,
    start: PathBuf,
    end: PathBuf,
}

fn workspace() -> Workspace {
    let dir = TempDir::new().unwrap();
    let processed = dir.path().join("extracted");
    let start = dir.path().join("start");
    let end = dir.path().join("end");
    for path in [&processed, &start, &end] {
        std::fs::create_dir_all(path).unwrap();
    }
    Workspace {
        _dir: dir,
        processed,
        start,
        end,
    }
}

fn gray_page(dir: &Path, name: &str, level: u8) {
    RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([level; 3]))
        .save(dir.join(name))
        .unwrap();
}

fn options(ws: &Workspace, pages_per_booklet: usize) -> BookletOptions {
    BookletOptions {
        processed_dir: ws.processed.clone(),
        start_pages_dir: ws.start.clone(),
        end_pages_dir: ws.end.clone(),
        page_width: WIDTH,
        page_height: HEIGHT,
        pages_per_booklet,
        ..Default::default()
    }
}

fn luma_at(path: &Path, x: u32, y: u32) -> u8 {
    let Luma([value]) = *image::open(path).unwrap().to_luma8().get_pixel(x, y);
    value
}

fn assert_level(path: &Path, x: u32, expected: u8) {
    let actual = luma_at(path, x, HEIGHT / 2);
    assert!(
        actual.abs_diff(expected) <= 6,
        "{} at x={x}: expected about {expected}, got {actual}",
        path.display()
    );
}

fn count_files(dir: &Path, prefix: &str) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .count()
}

#[tokio::test]
async fn test_spreads_follow_fold_orientation() {
    let ws = workspace();
    gray_page(&ws.start, "cover.png", 10);
    gray_page(&ws.processed, "X_01.png", 50);
    gray_page(&ws.processed, "X_02.png", 100);
    gray_page(&ws.processed, "X_03.png", 150);

    // Sequence [cover, 01, 02, 03]: pairs (0,3) forward and (1,2) reversed
    let output = create_booklet(&options(&ws, 24)).await.unwrap();
    assert_eq!(output.statistics.total_pages, 4);
    assert_eq!(output.spreads.len(), 2);

    let first = &output.spreads[0];
    assert_level(first, WIDTH / 2, 10);
    assert_level(first, WIDTH + WIDTH / 2, 150);

    let second = &output.spreads[1];
    assert_level(second, WIDTH / 2, 100);
    assert_level(second, WIDTH + WIDTH / 2, 50);

    let spread = image::open(first).unwrap();
    assert_eq!((spread.width(), spread.height()), (2 * WIDTH, HEIGHT));
}

#[tokio::test]
async fn test_full_booklet() {
    let ws = workspace();
    for i in 0..3 {
        gray_page(&ws.start, &format!("front_{i}.png"), 20);
    }
    for i in 0..5 {
        gray_page(&ws.processed, &format!("X_{i:02}.png"), 80);
    }
    for i in 0..2 {
        gray_page(&ws.end, &format!("back_{i}.png"), 200);
    }

    let options = options(&ws, 8);
    let output = create_booklet(&options).await.unwrap();

    let stats = &output.statistics;
    assert_eq!(stats.total_pages, 12);
    assert_eq!(stats.blank_pages_added, 2);
    assert_eq!(stats.pages_per_signature, vec![8, 4]);
    assert_eq!(stats.spreads, 6);

    let names: Vec<String> = output
        .spreads
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "booklet_000.jpg",
            "booklet_001.jpg",
            "booklet_002.jpg",
            "booklet_003.jpg",
            "booklet_004.jpg",
            "booklet_005.jpg",
        ]
    );

    assert_eq!(count_files(&ws.processed.join("blanks"), "blank_"), 2);
    assert_eq!(count_files(&ws.processed.join("scaled_start"), "front_"), 3);
    assert_eq!(count_files(&ws.processed.join("scaled_end"), "back_"), 2);

    // The user's front and back folders are not touched
    assert_eq!(count_files(&ws.start, ""), 3);
    assert_eq!(count_files(&ws.end, ""), 2);

    assert_eq!(output.document, ws.processed.join("booklet.pdf"));
    let document = lopdf::Document::load(&output.document).unwrap();
    assert_eq!(document.get_pages().len(), 6);
}

#[tokio::test]
async fn test_rerun_replaces_previous_output() {
    let ws = workspace();
    gray_page(&ws.start, "cover.png", 10);
    for i in 0..3 {
        gray_page(&ws.processed, &format!("X_{i:02}.png"), 90);
    }

    let options = options(&ws, 24);
    create_booklet(&options).await.unwrap();

    let booklets = ws.processed.join("booklets");
    std::fs::write(booklets.join("booklet_099.jpg"), b"stale").unwrap();
    std::fs::write(booklets.join("notes.txt"), b"keep me").unwrap();

    let output = create_booklet(&options).await.unwrap();
    assert_eq!(output.spreads.len(), 2);
    assert_eq!(output.statistics.main_pages, 3);
    assert_eq!(count_files(&booklets, "booklet_"), 2);
    assert!(booklets.join("notes.txt").exists());
}

#[tokio::test]
async fn test_unreadable_page_prints_blank() {
    let ws = workspace();
    gray_page(&ws.start, "cover.png", 10);
    gray_page(&ws.processed, "X_01.png", 50);
    std::fs::write(ws.processed.join("X_02.jpg"), b"broken").unwrap();
    gray_page(&ws.processed, "X_03.png", 150);

    let output = create_booklet(&options(&ws, 24)).await.unwrap();
    assert_eq!(output.spreads.len(), 2);
    assert_level(&output.spreads[1], WIDTH / 2, 255);

    let mut strict = options(&ws, 24);
    strict.decode_policy = DecodePolicy::Abort;
    assert!(matches!(
        create_booklet(&strict).await,
        Err(ImposeError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_plan_booklet_writes_nothing() {
    let ws = workspace();
    for i in 0..2 {
        gray_page(&ws.start, &format!("front_{i}.png"), 20);
    }
    for i in 0..47 {
        std::fs::write(ws.processed.join(format!("X_{i:03}.jpg")), b"").unwrap();
    }

    let stats = plan_booklet(&options(&ws, 24)).await.unwrap();
    assert_eq!(stats.total_pages, 52);
    assert_eq!(stats.pages_per_signature, vec![24, 24, 4]);

    assert!(!ws.processed.join("booklets").exists());
    assert!(!ws.processed.join("booklet.pdf").exists());
}

#[tokio::test]
async fn test_rendered_statistics_count_dropped_pages() {
    let ws = workspace();
    gray_page(&ws.start, "cover.png", 10);
    std::fs::write(ws.start.join("extra.jpg"), b"broken").unwrap();
    for i in 0..3 {
        gray_page(&ws.processed, &format!("X_{i:02}.png"), 90);
    }

    let options = options(&ws, 24);
    let planned = plan_booklet(&options).await.unwrap();
    assert_eq!(planned.front_pages, 2);
    assert_eq!(planned.total_pages, 8);

    // The unreadable front page is dropped while scaling
    let output = create_booklet(&options).await.unwrap();
    assert_eq!(output.statistics.front_pages, 1);
    assert_eq!(output.statistics.total_pages, 4);
    assert_eq!(output.statistics.spreads, output.spreads.len());
}

#[tokio::test]
async fn test_no_pages() {
    let ws = workspace();
    assert!(matches!(
        create_booklet(&options(&ws, 24)).await,
        Err(ImposeError::NoPages)
    ));
}

#[tokio::test]
async fn test_invalid_layout_rejected() {
    let ws = workspace();
    gray_page(&ws.processed, "X_01.png", 50);
    assert!(matches!(
        create_booklet(&options(&ws, 7)).await,
        Err(ImposeError::Config(_))
    ));
}

#[tokio::test]
async fn test_document_requires_spreads() {
    let dir = TempDir::new().unwrap();
    let result = render::save_document(&[], 72.0, dir.path().join("empty.pdf")).await;
    assert!(matches!(result, Err(ImposeError::NoPages)));
}
