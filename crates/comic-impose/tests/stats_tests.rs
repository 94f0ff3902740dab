use comic_impose::*;

#[test]
fn test_basic_statistics() {
    let stats = calculate_statistics(3, 5, 2, 24).unwrap();

    assert_eq!(stats.front_pages, 3);
    assert_eq!(stats.main_pages, 5);
    assert_eq!(stats.back_pages, 2);
    assert_eq!(stats.blank_pages_added, 2);
    assert_eq!(stats.total_pages, 12);
    assert_eq!(stats.signatures, 1);
    assert_eq!(stats.pages_per_signature, vec![12]);
    assert_eq!(stats.spreads, 6);
    assert_eq!(stats.sheets, 3);
}

#[test]
fn test_statistics_multiple_signatures() {
    // Even front: one closing blank, 2 + 1 + 47 = 50, padded to 52
    let stats = calculate_statistics(2, 47, 0, 24).unwrap();

    assert_eq!(stats.total_pages, 52);
    assert_eq!(stats.blank_pages_added, 3);
    assert_eq!(stats.pages_per_signature, vec![24, 24, 4]);
    assert_eq!(stats.spreads, 26);
    assert_eq!(stats.sheets, 13);
}

#[test]
fn test_statistics_without_front_matter() {
    // An empty front counts as even
    let stats = calculate_statistics(0, 4, 0, 24).unwrap();
    assert_eq!(stats.total_pages, 8);
    assert_eq!(stats.blank_pages_added, 4);
}

#[test]
fn test_statistics_no_pages() {
    assert!(matches!(
        calculate_statistics(0, 0, 0, 24),
        Err(ImposeError::NoPages)
    ));
}

#[test]
fn test_statistics_invalid_pages_per_booklet() {
    assert!(matches!(
        calculate_statistics(1, 3, 0, 3),
        Err(ImposeError::Config(_))
    ));
}
