use comic_impose::*;
use std::path::Path;

#[test]
fn test_page_number_from_label() {
    assert_eq!(
        PageNumber::from_label("p1").map(|n| n.as_str().to_string()),
        Some("1".to_string())
    );
    assert_eq!(
        PageNumber::from_label("004").map(|n| n.as_str().to_string()),
        Some("004".to_string())
    );
    assert!(PageNumber::from_label("cover").is_none());
}

#[test]
fn test_page_number_leading_one() {
    for token in ["01", "001", "0001"] {
        let number = PageNumber::from_label(token).unwrap();
        assert!(number.is_leading_one(), "{token} should qualify");
    }
    for token in ["1", "10", "011", "00"] {
        let number = PageNumber::from_label(token).unwrap();
        assert!(!number.is_leading_one(), "{token} should not qualify");
    }
}

#[test]
fn test_page_number_zeroed_keeps_width() {
    let number = PageNumber::from_label("001").unwrap();
    assert_eq!(number.zeroed().as_str(), "000");
    assert_eq!(number.zeroed().width(), 3);
    assert_eq!(PageNumber::from_label("01").unwrap().zeroed().as_str(), "00");
}

#[test]
fn test_page_number_value() {
    assert_eq!(PageNumber::from_label("0042").unwrap().value(), 42);
}

#[test]
fn test_page_file_name() {
    let page = Page::new(Path::new("/tmp/out"), "X", "p3-04", "jpg");
    assert_eq!(page.file_name(), "X_p3-04.jpg");
    assert_eq!(page.path, Path::new("/tmp/out/X_p3-04.jpg"));
    assert_eq!(page.dir(), Path::new("/tmp/out"));
    assert_eq!(page.format(), Some(PageFormat::Jpg));
}

#[test]
fn test_page_double_page_numbers() {
    let page = Page::new(Path::new("."), "X", "p3-04", "jpg");
    let (first, second) = page.double_page_numbers().unwrap();
    assert_eq!(first.as_str(), "3");
    assert_eq!(second.as_str(), "04");

    let single = Page::new(Path::new("."), "X", "p3", "jpg");
    assert!(single.double_page_numbers().is_none());
}

#[test]
fn test_unit_with_underscores() {
    let page = Page::new(Path::new("."), "Vol_1", "01", "png");
    assert_eq!(page.file_name(), "Vol_1_01.png");
    assert!(page.has_standalone_number());
    assert_eq!(page.sibling("00").file_name(), "Vol_1_00.png");
}

#[test]
fn test_standalone_number() {
    assert!(Page::new(Path::new("."), "X", "01", "jpg").has_standalone_number());
    assert!(Page::new(Path::new("."), "X", "page_01", "jpg").has_standalone_number());
    assert!(!Page::new(Path::new("."), "X", "p01", "jpg").has_standalone_number());
    assert!(!Page::new(Path::new("."), "X", "cover", "jpg").has_standalone_number());
}

#[test]
fn test_renumbered_replaces_only_trailing_token() {
    let zero = PageNumber::from_label("00").unwrap();

    let page = Page::new(Path::new("."), "X", "page_01", "png");
    assert_eq!(page.renumbered(&zero).unwrap().file_name(), "X_page_00.png");

    let bare = Page::new(Path::new("."), "X", "01", "png");
    assert_eq!(bare.renumbered(&zero).unwrap().file_name(), "X_00.png");

    let glued = Page::new(Path::new("."), "X", "p01", "png");
    assert!(glued.renumbered(&zero).is_none());
}

#[test]
fn test_page_format_extensions() {
    assert_eq!(PageFormat::from_extension("JPEG"), Some(PageFormat::Jpg));
    assert_eq!(PageFormat::from_extension("webp"), Some(PageFormat::Webp));
    assert_eq!(PageFormat::from_extension("xml"), None);
    assert_eq!(PageFormat::Png.extension(), "png");
    assert_eq!(
        PageFormat::from_path(Path::new("a/b.PNG")),
        Some(PageFormat::Png)
    );
}

#[test]
fn test_fold_pairing_sides() {
    let forward = FoldPairing {
        first: 4,
        second: 7,
        orientation: Orientation::Forward,
    };
    assert_eq!((forward.left(), forward.right()), (4, 7));

    let reversed = FoldPairing {
        first: 5,
        second: 6,
        orientation: Orientation::Reversed,
    };
    assert_eq!((reversed.left(), reversed.right()), (6, 5));
}
