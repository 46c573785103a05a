//! Formatting options applied to Office ranges

use crate::convert::{to_ole_color, Rgb};

/// Font and shading options for a Word `Range`
///
/// Options left unset are not touched on the range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeStyle {
    /// `Font.Color` as OLE_COLOR
    pub font_color: Option<i32>,
    /// `Shading.BackgroundPatternColor` as OLE_COLOR
    pub background_color: Option<i32>,
    /// `Font.Size` in points
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RangeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_color(mut self, color: Rgb) -> Self {
        self.font_color = Some(to_ole_color(color));
        self
    }

    pub fn background_color(mut self, color: Rgb) -> Self {
        self.background_color = Some(to_ole_color(color));
        self
    }

    pub fn font_size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Whether applying this style touches the `Font` object at all
    pub fn touches_font(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.font_color.is_some()
            || self.font_size.is_some()
    }

    /// Header style used for table header rows: bold white text on dark red
    pub fn header() -> Self {
        Self::new()
            .font_color(Rgb::WHITE)
            .background_color(Rgb::DARK_RED)
            .bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_touches_nothing() {
        let style = RangeStyle::new();
        assert!(!style.touches_font());
        assert_eq!(style.background_color, None);
    }

    #[test]
    fn test_builder() {
        let style = RangeStyle::new()
            .font_color(Rgb::BLUE)
            .font_size(14.0)
            .italic()
            .underline();
        assert_eq!(style.font_color, Some(0xFF0000));
        assert_eq!(style.font_size, Some(14.0));
        assert!(style.italic && style.underline && !style.bold);
        assert!(style.touches_font());
    }

    #[test]
    fn test_header_style() {
        let style = RangeStyle::header();
        assert_eq!(style.font_color, Some(0xFFFFFF));
        assert_eq!(style.background_color, Some(139));
        assert!(style.bold);
        assert_eq!(style.font_size, None);
    }
}
