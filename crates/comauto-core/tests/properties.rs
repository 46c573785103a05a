//! Property tests for column arithmetic and address parsing

use comauto_core::address::{
    column_letter_to_number, column_number_to_letters, format_absolute_address,
    parse_absolute_address,
};
use comauto_core::{CellCoord, MAX_COLS, MAX_ROWS};
use proptest::prelude::*;

/// Column designators ordered by length, then alphabetically
fn shortlex_less(a: &str, b: &str) -> bool {
    (a.len(), a) < (b.len(), b)
}

proptest! {
    #[test]
    fn column_letters_round_trip(n in 1u32..=MAX_COLS) {
        let letters = column_number_to_letters(n).unwrap();
        prop_assert_eq!(column_letter_to_number(&letters).unwrap(), n);
    }

    #[test]
    fn column_conversion_is_strictly_increasing(a in "[A-Z]{1,2}", b in "[A-Z]{1,2}") {
        let na = column_letter_to_number(&a).unwrap();
        let nb = column_letter_to_number(&b).unwrap();
        prop_assert_eq!(shortlex_less(&a, &b), na < nb);
        prop_assert_eq!(a == b, na == nb);
    }

    #[test]
    fn lowercase_matches_uppercase(letters in "[a-z]{1,3}") {
        prop_assert_eq!(
            column_letter_to_number(&letters).unwrap(),
            column_letter_to_number(&letters.to_ascii_uppercase()).unwrap()
        );
    }

    #[test]
    fn absolute_address_round_trip(row in 1u32..=MAX_ROWS, column in 1u32..=MAX_COLS) {
        let coord = CellCoord::new(row, column);
        let address = format_absolute_address(coord).unwrap();
        prop_assert_eq!(parse_absolute_address(&address), Some(coord));
        prop_assert_eq!(address.parse::<CellCoord>().unwrap(), coord);
    }
}

#[test]
fn one_and_two_letter_anchors() {
    for (letters, n) in [("A", 1), ("Z", 26), ("AA", 27), ("AZ", 52), ("BA", 53), ("ZZ", 702)] {
        assert_eq!(column_letter_to_number(letters).unwrap(), n, "{letters}");
    }
}

#[test]
fn one_and_two_letter_columns_cover_1_to_702() {
    let mut all: Vec<String> = Vec::new();
    for a in 'A'..='Z' {
        all.push(a.to_string());
    }
    for a in 'A'..='Z' {
        for b in 'A'..='Z' {
            all.push(format!("{a}{b}"));
        }
    }
    let numbers: Vec<u32> = all
        .iter()
        .map(|s| column_letter_to_number(s).unwrap())
        .collect();
    let expected: Vec<u32> = (1..=702).collect();
    assert_eq!(numbers, expected);
}
