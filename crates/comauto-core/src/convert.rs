//! Conversions between Rust values and the encodings automation servers expect
//!
//! - OLE_COLOR: a 24-bit integer laid out as `0x00BBGGRR`
//! - COM booleans: Office setters accept `1`/`0`, raw VARIANTs use `-1`/`0`
//! - OLE Automation Date: fractional days since 1899-12-30 00:00

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::{Error, Result};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const DARK_RED: Rgb = Rgb::new(139, 0, 0);

    /// Create an RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// This color as an OLE_COLOR
    pub fn to_ole(self) -> i32 {
        to_ole_color(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Pack a color into OLE_COLOR (`0x00BBGGRR`)
pub fn to_ole_color(color: Rgb) -> i32 {
    ((color.b as i32) << 16) | ((color.g as i32) << 8) | color.r as i32
}

/// Unpack an OLE_COLOR; the high byte (system color flag) is ignored
pub fn from_ole_color(value: i32) -> Rgb {
    Rgb {
        r: (value & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: ((value >> 16) & 0xFF) as u8,
    }
}

/// Boolean as Office property setters accept it: 1 or 0
pub fn to_com_bool(value: bool) -> i32 {
    if value {
        1
    } else {
        0
    }
}

/// Boolean as a raw `VARIANT_BOOL`: `VARIANT_TRUE` (-1) or `VARIANT_FALSE` (0)
pub fn variant_bool(value: bool) -> i16 {
    if value {
        -1
    } else {
        0
    }
}

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days from 1899-12-30 to 1970-01-01
const OLE_DAYS_TO_UNIX_EPOCH: i64 = 25_569;

/// Smallest and largest OLE dates (exclusive): 0100-01-01 and 10000-01-01
const OLE_DATE_MIN: f64 = -657_435.0;
const OLE_DATE_MAX: f64 = 2_958_466.0;

fn ole_epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc() - Duration::days(OLE_DAYS_TO_UNIX_EPOCH)
}

fn in_ole_range(value: f64) -> bool {
    !value.is_nan() && value > OLE_DATE_MIN && value < OLE_DATE_MAX
}

/// Convert a date-time to an OLE Automation Date
///
/// Before the epoch the integer part counts days backwards while the fraction
/// still measures time forward from midnight, so 1899-12-29 06:00 is `-1.25`.
/// Dates before year 100 or from year 10000 on have no OLE representation.
pub fn to_ole_date(value: NaiveDateTime) -> Result<f64> {
    let mut millis = (value - ole_epoch()).num_milliseconds();
    if millis < 0 {
        let frac = millis % MILLIS_PER_DAY;
        if frac != 0 {
            millis -= (MILLIS_PER_DAY + frac) * 2;
        }
    }
    let serial = millis as f64 / MILLIS_PER_DAY as f64;
    if in_ole_range(serial) {
        Ok(serial)
    } else {
        Err(Error::DateOutOfRange(serial))
    }
}

/// Convert an OLE Automation Date to a date-time, rounded to the millisecond
pub fn from_ole_date(value: f64) -> Result<NaiveDateTime> {
    if !in_ole_range(value) {
        return Err(Error::DateOutOfRange(value));
    }

    let half = if value >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (value * MILLIS_PER_DAY as f64 + half) as i64;
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }

    ole_epoch()
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or(Error::DateOutOfRange(value))
}
