use super::cases::truncate_title;
use super::timeline::first_visible_row;

#[test]
fn test_first_visible_row_at_origin() {
    assert_eq!(first_visible_row(0.0), 0);
}

#[test]
fn test_first_visible_row_rounds() {
    assert_eq!(first_visible_row(-12.0), 12);
    assert_eq!(first_visible_row(-12.4), 12);
    assert_eq!(first_visible_row(-12.6), 13);
}

#[test]
fn test_first_visible_row_never_negative() {
    // transient spring excursions above the origin clamp to the first row
    assert_eq!(first_visible_row(0.4), 0);
}

#[test]
fn test_truncate_title_short() {
    assert_eq!(truncate_title("AlphaFold", 20), "AlphaFold");
}

#[test]
fn test_truncate_title_long() {
    let truncated = truncate_title("Pandemic Drug Screening Acceleration", 12);
    assert!(truncated.ends_with('…'));
    assert!(unicode_width::UnicodeWidthStr::width(truncated.as_str()) <= 12);
}
