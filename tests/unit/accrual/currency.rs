use super::*;

#[test]
fn formats_with_grouping_and_two_decimals() {
    assert_eq!(format_currency(1234.5), "$1,234.50");
    assert_eq!(format_currency(0.0), "$0.00");
    assert_eq!(format_currency(1.0), "$1.00");
    assert_eq!(format_currency(999.999), "$1,000.00");
    assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    assert_eq!(format_currency(100_000.0), "$100,000.00");
}

#[test]
fn small_amounts_have_no_separator() {
    assert_eq!(format_currency(0.05), "$0.05");
    assert_eq!(format_currency(12.3), "$12.30");
    assert_eq!(format_currency(999.0), "$999.00");
}

#[test]
fn negative_amounts_keep_sign_after_symbol() {
    assert_eq!(format_currency(-1234.5), "$-1,234.50");
    assert_eq!(format_currency(-0.0), "$0.00");
}

#[test]
fn non_finite_values_do_not_panic() {
    assert_eq!(format_currency(f64::INFINITY), "$inf");
    assert_eq!(format_currency(f64::NAN), "$NaN");
}

#[test]
fn grouping_helper_handles_every_length() {
    assert_eq!(group_thousands("1"), "1");
    assert_eq!(group_thousands("12"), "12");
    assert_eq!(group_thousands("123"), "123");
    assert_eq!(group_thousands("1234"), "1,234");
    assert_eq!(group_thousands("123456"), "123,456");
    assert_eq!(group_thousands("1234567"), "1,234,567");
}
