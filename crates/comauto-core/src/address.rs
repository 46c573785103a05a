//! Column letters and cell addresses as Excel reports them over automation
//!
//! Excel columns are a bijective base-26 numeral: there is no zero digit,
//! 'A' is 1 and 'Z' is 26, so "AA" follows "Z" as 27.

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;

use crate::error::{Error, Result};

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27)
///
/// Letters are case-insensitive.
///
/// # Examples
/// ```
/// use comauto_core::address::column_letter_to_number;
///
/// assert_eq!(column_letter_to_number("A").unwrap(), 1);
/// assert_eq!(column_letter_to_number("AZ").unwrap(), 52);
/// assert_eq!(column_letter_to_number("xfd").unwrap(), 16384);
/// ```
pub fn column_letter_to_number(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidColumn("empty column letters".into()));
    }

    let mut sum: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumn(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        sum = sum
            .checked_mul(26)
            .and_then(|s| s.checked_add(digit))
            .ok_or_else(|| Error::InvalidColumn(format!("'{}' overflows", letters)))?;
    }

    Ok(sum)
}

/// Convert a 1-based column number to letters (1 = A, 27 = AA)
pub fn column_number_to_letters(number: u32) -> Result<String> {
    if number == 0 {
        return Err(Error::InvalidColumn("column numbers start at 1".into()));
    }

    let mut result = Vec::new();
    let mut n = number;
    while n > 0 {
        n -= 1;
        result.push((n % 26) as u8 + b'A');
        n /= 26;
    }
    result.reverse();

    // Only ASCII uppercase bytes were pushed
    Ok(result.into_iter().map(char::from).collect())
}

/// A cell position, 1-based in both directions the way Excel reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A = 1)
    pub column: u32,
}

impl CellCoord {
    /// Create a coordinate from 1-based row and column numbers
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Column letters for this coordinate
    pub fn column_letters(&self) -> Result<String> {
        column_number_to_letters(self.column)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column_letters() {
            Ok(letters) => write!(f, "{}{}", letters, self.row),
            Err(_) => write!(f, "R{}C{}", self.row, self.column),
        }
    }
}

impl FromStr for CellCoord {
    type Err = Error;

    /// Parse `A1`, `$A$1`, `$A1` or `A$1`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (_, letters, digits) = regex_captures!(r"^\$?([A-Za-z]+)\$?(\d+)$", s)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        let column = column_letter_to_number(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { row, column })
    }
}

/// Extract the coordinate from an absolute address such as `$B$7`
///
/// This is the shape `Range.Address` returns. The first `$COL$ROW` match wins,
/// so the top-left corner of `$A$1:$C$3` is returned. Addresses with no match,
/// a zero row, or numbers that overflow give `None`.
pub fn parse_absolute_address(address: &str) -> Option<CellCoord> {
    let (_, letters, digits) = regex_captures!(r"\$([A-Z]+)\$(\d+)", address)?;
    let column = column_letter_to_number(letters).ok()?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(CellCoord { row, column })
}

/// Format a coordinate as an absolute address (`$B$7`)
pub fn format_absolute_address(coord: CellCoord) -> Result<String> {
    Ok(format!("${}${}", coord.column_letters()?, coord.row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_letter_to_number() {
        assert_eq!(column_letter_to_number("A").unwrap(), 1);
        assert_eq!(column_letter_to_number("B").unwrap(), 2);
        assert_eq!(column_letter_to_number("Z").unwrap(), 26);
        assert_eq!(column_letter_to_number("AA").unwrap(), 27);
        assert_eq!(column_letter_to_number("AB").unwrap(), 28);
        assert_eq!(column_letter_to_number("AZ").unwrap(), 52);
        assert_eq!(column_letter_to_number("BA").unwrap(), 53);
        assert_eq!(column_letter_to_number("ZZ").unwrap(), 702);
        assert_eq!(column_letter_to_number("AAA").unwrap(), 703);
        assert_eq!(column_letter_to_number("XFD").unwrap(), 16384); // Max Excel column

        // Case insensitive
        assert_eq!(column_letter_to_number("a").unwrap(), 1);
        assert_eq!(column_letter_to_number("aB").unwrap(), 28);
    }

    #[test]
    fn test_column_letter_errors() {
        assert!(column_letter_to_number("").is_err());
        assert!(column_letter_to_number("A1").is_err());
        assert!(column_letter_to_number("$A").is_err());
        assert!(column_letter_to_number("É").is_err());
        // 26^7 already exceeds u32
        assert!(column_letter_to_number("ZZZZZZZZ").is_err());
    }

    #[test]
    fn test_column_number_to_letters() {
        assert_eq!(column_number_to_letters(1).unwrap(), "A");
        assert_eq!(column_number_to_letters(26).unwrap(), "Z");
        assert_eq!(column_number_to_letters(27).unwrap(), "AA");
        assert_eq!(column_number_to_letters(52).unwrap(), "AZ");
        assert_eq!(column_number_to_letters(53).unwrap(), "BA");
        assert_eq!(column_number_to_letters(702).unwrap(), "ZZ");
        assert_eq!(column_number_to_letters(703).unwrap(), "AAA");
        assert_eq!(column_number_to_letters(16384).unwrap(), "XFD");
        assert!(column_number_to_letters(0).is_err());
    }

    #[test]
    fn test_parse_absolute_address() {
        assert_eq!(parse_absolute_address("$A$1"), Some(CellCoord::new(1, 1)));
        assert_eq!(parse_absolute_address("$B$7"), Some(CellCoord::new(7, 2)));
        assert_eq!(
            parse_absolute_address("$AB$1048576"),
            Some(CellCoord::new(1_048_576, 28))
        );
        // Multi-cell address yields its first corner
        assert_eq!(
            parse_absolute_address("$C$3:$E$9"),
            Some(CellCoord::new(3, 3))
        );
        // Sheet-qualified external form
        assert_eq!(
            parse_absolute_address("[Book1]Sheet1!$D$4"),
            Some(CellCoord::new(4, 4))
        );
    }

    #[test]
    fn test_parse_absolute_address_rejects() {
        assert_eq!(parse_absolute_address("A1"), None);
        assert_eq!(parse_absolute_address("$A1"), None);
        assert_eq!(parse_absolute_address("$a$1"), None);
        assert_eq!(parse_absolute_address("$A$0"), None);
        assert_eq!(parse_absolute_address("$A$99999999999"), None);
        assert_eq!(parse_absolute_address(""), None);
    }

    #[test]
    fn test_format_absolute_address() {
        assert_eq!(
            format_absolute_address(CellCoord::new(7, 2)).unwrap(),
            "$B$7"
        );
        assert_eq!(
            format_absolute_address(CellCoord::new(100, 27)).unwrap(),
            "$AA$100"
        );
        assert!(format_absolute_address(CellCoord::new(1, 0)).is_err());
    }

    #[test]
    fn test_cell_coord_from_str() {
        assert_eq!("A1".parse::<CellCoord>().unwrap(), CellCoord::new(1, 1));
        assert_eq!("$C$5".parse::<CellCoord>().unwrap(), CellCoord::new(5, 3));
        assert_eq!("c$5".parse::<CellCoord>().unwrap(), CellCoord::new(5, 3));
        assert_eq!(" $AA10 ".parse::<CellCoord>().unwrap(), CellCoord::new(10, 27));

        assert!("".parse::<CellCoord>().is_err());
        assert!("A".parse::<CellCoord>().is_err());
        assert!("1".parse::<CellCoord>().is_err());
        assert!("A0".parse::<CellCoord>().is_err());
        assert!("A1:B2".parse::<CellCoord>().is_err());
    }

    #[test]
    fn test_cell_coord_display() {
        assert_eq!(CellCoord::new(1, 1).to_string(), "A1");
        assert_eq!(CellCoord::new(100, 3).to_string(), "C100");
        assert_eq!(CellCoord::new(4, 0).to_string(), "R4C0");
    }
}
