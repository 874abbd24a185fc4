//! Per-item measurement and sub-rectangle placement.
//!
//! Given an item's display content (text, optional subtext, glyph size)
//! and a maximum available width, [`measure_item`] computes the item's
//! minimum bounding size and the placement of its internal parts: the
//! check/radio glyph position, the text rectangle, the subtext rectangle,
//! and the focus rectangle (the union of text and subtext). All output
//! rectangles are relative to the item's own origin.
//!
//! Measurement is a pure function of its inputs: no side effects, and two
//! calls with identical inputs yield identical rectangles. Actual text
//! extents come from a host-supplied [`TextMeasurer`]; this module only
//! does the placement arithmetic.

use slat_core::{Point, Rect, Size};

/// Horizontal padding reserved on each side of the glyph, in pixels.
pub const GLYPH_SIDE_PADDING: i32 = 3;

/// Vertical padding between a top/bottom-centered glyph and the text block,
/// in pixels.
pub const GLYPH_TOP_PADDING: i32 = 2;

/// One of the nine compass positions used to align the glyph or the text
/// block within an item.
///
/// The row (top/middle/bottom) and column (left/center/right) components
/// act independently; helper predicates expose each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentAlignment {
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ContentAlignment {
    /// Whether the alignment is in the top row.
    #[inline]
    pub fn is_top(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }

    /// Whether the alignment is in the middle row.
    #[inline]
    pub fn is_middle(&self) -> bool {
        matches!(
            self,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight
        )
    }

    /// Whether the alignment is in the bottom row.
    #[inline]
    pub fn is_bottom(&self) -> bool {
        matches!(
            self,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight
        )
    }

    /// Whether the alignment is in the left column.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Self::TopLeft | Self::MiddleLeft | Self::BottomLeft)
    }

    /// Whether the alignment is in the center column.
    #[inline]
    pub fn is_center(&self) -> bool {
        matches!(
            self,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter
        )
    }

    /// Whether the alignment is in the right column.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Self::TopRight | Self::MiddleRight | Self::BottomRight)
    }

    /// The horizontally mirrored alignment (left and right columns swap).
    ///
    /// Used by hosts that flip layout direction for RTL locales.
    pub fn mirrored(&self) -> Self {
        match self {
            Self::TopLeft => Self::TopRight,
            Self::TopRight => Self::TopLeft,
            Self::MiddleLeft => Self::MiddleRight,
            Self::MiddleRight => Self::MiddleLeft,
            Self::BottomLeft => Self::BottomRight,
            Self::BottomRight => Self::BottomLeft,
            other => *other,
        }
    }
}

/// Host-supplied text measurement.
///
/// `measure` returns the extent of `text` word-wrapped within `max_width`
/// pixels. A non-positive `max_width` means "measure at minimum width,
/// wrapping maximally"; the measurer must not fail on it. Font selection
/// is the host's concern: a list uses one measurer for text and a second
/// one for subtext when the subtext font differs.
pub trait TextMeasurer {
    /// Measure `text` wrapped to at most `max_width` pixels.
    fn measure(&self, text: &str, max_width: i32) -> Size;
}

/// The measured size and internal placement of a single item.
///
/// All rectangles are relative to the item's own bounding-box origin.
/// Valid only until the next layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemMetrics {
    /// The item's minimum bounding size.
    pub size: Size,
    /// Top-left corner of the glyph.
    pub glyph_pos: Point,
    /// Rectangle the text is drawn in.
    pub text_rect: Rect,
    /// Rectangle the subtext is drawn in; `Rect::ZERO` when there is no
    /// subtext.
    pub subtext_rect: Rect,
    /// Union of the text and subtext rectangles; where the focus indicator
    /// is drawn and what tooltip hit-testing uses.
    pub focus_rect: Rect,
}

/// Inputs to [`measure_item`].
#[derive(Debug, Clone, Copy)]
pub struct MeasureSpec<'a> {
    /// The item's main text.
    pub text: &'a str,
    /// Optional smaller text below the main text.
    pub subtext: Option<&'a str>,
    /// Size of the check/radio glyph; `Size::ZERO` when no glyph is drawn.
    pub glyph_size: Size,
    /// Maximum width available to the whole item.
    pub max_width: i32,
    /// Where the glyph sits within the item.
    pub check_align: ContentAlignment,
    /// Where the text block sits within the item.
    pub text_align: ContentAlignment,
    /// Vertical gap between text and subtext, in pixels.
    pub subtext_separator: i32,
}

/// Align a span of `width` within `[x0, x0 + avail)` horizontally.
fn align_x(align: ContentAlignment, x0: i32, avail: i32, width: i32) -> i32 {
    if align.is_right() {
        x0 + avail - width
    } else if align.is_center() {
        x0 + (avail - width) / 2
    } else {
        x0
    }
}

/// Compute an item's bounding size and internal layout.
///
/// See the module docs for the overall contract. The `measurer` is invoked
/// once for the text and once for the subtext (when present); the
/// `subtext_measurer` exists because subtext typically renders in a
/// different font.
pub fn measure_item(
    spec: &MeasureSpec<'_>,
    measurer: &dyn TextMeasurer,
    subtext_measurer: &dyn TextMeasurer,
) -> ItemMetrics {
    let glyph = spec.glyph_size;
    let has_glyph = !glyph.is_empty();

    // A horizontally centered glyph stacks above/below/behind the text, so
    // the text keeps the full item width. Otherwise the glyph plus its side
    // padding is reserved out of the text's width budget.
    let centered_glyph = has_glyph && spec.check_align.is_center();
    let reserved = if has_glyph && !centered_glyph {
        glyph.width + 2 * GLYPH_SIDE_PADDING
    } else {
        0
    };

    let text_max = spec.max_width - reserved;
    let text_size = measurer.measure(spec.text, text_max);
    let subtext = spec.subtext.filter(|s| !s.is_empty());
    let subtext_size = match subtext {
        Some(s) => subtext_measurer.measure(s, text_max),
        None => Size::ZERO,
    };

    // The text block: text, then separator + subtext when present.
    let block_height = text_size.height
        + if subtext.is_some() {
            spec.subtext_separator + subtext_size.height
        } else {
            0
        };

    let stacked_glyph = centered_glyph && !spec.check_align.is_middle();
    let mut height = block_height;
    if stacked_glyph {
        height += glyph.height + GLYPH_TOP_PADDING;
    } else if has_glyph {
        height = height.max(glyph.height);
    }

    let content_width = text_size.width.max(subtext_size.width);
    let width = if centered_glyph {
        content_width.max(glyph.width)
    } else {
        content_width + reserved
    };

    // Glyph position: the row component picks the vertical edge, the
    // column component the horizontal edge.
    let glyph_pos = if has_glyph {
        let gy = if spec.check_align.is_bottom() {
            height - glyph.height
        } else if spec.check_align.is_middle() {
            (height - glyph.height) / 2
        } else {
            0
        };
        let gx = if spec.check_align.is_right() {
            width - glyph.width
        } else if spec.check_align.is_center() {
            (width - glyph.width) / 2
        } else {
            0
        };
        Point::new(gx, gy)
    } else {
        Point::ZERO
    };

    // Horizontal band available to the text block. A left-column glyph
    // pushes the text right by the reserved width; a right-column glyph
    // narrows it from the right; a centered glyph leaves the full width.
    let (band_x, band_w) = if reserved > 0 {
        if spec.check_align.is_right() {
            (0, width - reserved)
        } else {
            (reserved, width - reserved)
        }
    } else {
        (0, width)
    };

    // Vertical band: a top-centered glyph pushes the block down, a
    // bottom-centered glyph shortens it from below. The text alignment's
    // row component then places the block within the band.
    let band_y = if stacked_glyph && spec.check_align.is_top() {
        glyph.height + GLYPH_TOP_PADDING
    } else {
        0
    };
    let band_h = if stacked_glyph && spec.check_align.is_bottom() {
        height - band_y - (glyph.height + GLYPH_TOP_PADDING)
    } else {
        height - band_y
    };

    let block_y = if spec.text_align.is_bottom() {
        band_y + band_h - block_height
    } else if spec.text_align.is_middle() {
        band_y + (band_h - block_height) / 2
    } else {
        band_y
    };

    // The column component of the text alignment places text and subtext
    // independently, so with a centered alignment the narrower of the two
    // re-centers against the wider.
    let text_rect = Rect::new(
        align_x(spec.text_align, band_x, band_w, text_size.width),
        block_y,
        text_size.width,
        text_size.height,
    );
    let subtext_rect = if subtext.is_some() {
        Rect::new(
            align_x(spec.text_align, band_x, band_w, subtext_size.width),
            block_y + text_size.height + spec.subtext_separator,
            subtext_size.width,
            subtext_size.height,
        )
    } else {
        Rect::ZERO
    };

    ItemMetrics {
        size: Size::new(width, height),
        glyph_pos,
        text_rect,
        subtext_rect,
        focus_rect: text_rect.union(&subtext_rect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic fake measurer: every character is `char_width` wide,
    /// lines are `line_height` tall, wrapping at `max_width`.
    pub struct FixedMeasurer {
        pub char_width: i32,
        pub line_height: i32,
    }

    impl FixedMeasurer {
        pub fn new() -> Self {
            Self {
                char_width: 8,
                line_height: 16,
            }
        }
    }

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, max_width: i32) -> Size {
            if text.is_empty() {
                return Size::ZERO;
            }
            let chars = text.chars().count() as i32;
            let full_width = chars * self.char_width;
            if max_width <= 0 {
                // Minimum width: one character per line.
                return Size::new(self.char_width, chars * self.line_height);
            }
            let per_line = (max_width / self.char_width).max(1);
            let lines = (chars + per_line - 1) / per_line;
            Size::new(full_width.min(per_line * self.char_width), lines * self.line_height)
        }
    }

    fn spec<'a>(text: &'a str, subtext: Option<&'a str>) -> MeasureSpec<'a> {
        MeasureSpec {
            text,
            subtext,
            glyph_size: Size::new(16, 16),
            max_width: 200,
            check_align: ContentAlignment::MiddleLeft,
            text_align: ContentAlignment::TopLeft,
            subtext_separator: 4,
        }
    }

    #[test]
    fn test_measure_is_deterministic() {
        let m = FixedMeasurer::new();
        let s = spec("hello world", Some("details"));
        let a = measure_item(&s, &m, &m);
        let b = measure_item(&s, &m, &m);
        assert_eq!(a, b);
    }

    #[test]
    fn test_left_glyph_reserves_width() {
        let m = FixedMeasurer::new();
        let s = spec("hello", None);
        let metrics = measure_item(&s, &m, &m);

        // Text starts after glyph (16) + 3px padding each side.
        assert_eq!(metrics.text_rect.left(), 16 + 2 * GLYPH_SIDE_PADDING);
        assert_eq!(metrics.glyph_pos.x, 0);
        // 5 chars * 8px = 40, plus the 22px reservation.
        assert_eq!(metrics.size, Size::new(40 + 22, 16));
    }

    #[test]
    fn test_zero_glyph_no_padding() {
        let m = FixedMeasurer::new();
        let mut s = spec("hello", None);
        s.glyph_size = Size::ZERO;
        let metrics = measure_item(&s, &m, &m);

        assert_eq!(metrics.text_rect.left(), 0);
        assert_eq!(metrics.text_rect.top(), 0);
        assert_eq!(metrics.size, Size::new(40, 16));
    }

    #[test]
    fn test_empty_subtext_contributes_nothing() {
        let m = FixedMeasurer::new();
        let with_none = measure_item(&spec("hi", None), &m, &m);
        let with_empty = measure_item(&spec("hi", Some("")), &m, &m);

        assert_eq!(with_none, with_empty);
        assert_eq!(with_none.subtext_rect, Rect::ZERO);
        assert_eq!(with_none.focus_rect, with_none.text_rect);
    }

    #[test]
    fn test_subtext_below_text_with_separator() {
        let m = FixedMeasurer::new();
        let metrics = measure_item(&spec("hello", Some("sub")), &m, &m);

        assert_eq!(metrics.subtext_rect.top(), 16 + 4);
        assert_eq!(metrics.size.height, 16 + 4 + 16);
        // Focus rect spans both.
        assert_eq!(metrics.focus_rect, metrics.text_rect.union(&metrics.subtext_rect));
        assert_eq!(metrics.focus_rect.bottom(), 36);
    }

    #[test]
    fn test_top_center_glyph_pushes_text_down() {
        let m = FixedMeasurer::new();
        let mut s = spec("hello", None);
        s.check_align = ContentAlignment::TopCenter;
        let metrics = measure_item(&s, &m, &m);

        // Glyph stacked above: height = glyph + 2px + text.
        assert_eq!(metrics.size.height, 16 + GLYPH_TOP_PADDING + 16);
        assert_eq!(metrics.glyph_pos.y, 0);
        assert_eq!(metrics.text_rect.top(), 16 + GLYPH_TOP_PADDING);
        // Text keeps the full width; glyph centers over it.
        assert_eq!(metrics.size.width, 40);
        assert_eq!(metrics.glyph_pos.x, (40 - 16) / 2);
    }

    #[test]
    fn test_bottom_center_glyph_sits_below() {
        let m = FixedMeasurer::new();
        let mut s = spec("hello", None);
        s.check_align = ContentAlignment::BottomCenter;
        let metrics = measure_item(&s, &m, &m);

        assert_eq!(metrics.size.height, 16 + GLYPH_TOP_PADDING + 16);
        assert_eq!(metrics.glyph_pos.y, metrics.size.height - 16);
        assert_eq!(metrics.text_rect.top(), 0);
    }

    #[test]
    fn test_right_glyph_at_far_edge() {
        let m = FixedMeasurer::new();
        let mut s = spec("hello", None);
        s.check_align = ContentAlignment::MiddleRight;
        let metrics = measure_item(&s, &m, &m);

        assert_eq!(metrics.glyph_pos.x, metrics.size.width - 16);
        assert_eq!(metrics.text_rect.left(), 0);
    }

    #[test]
    fn test_middle_left_glyph_vertically_centered() {
        let m = FixedMeasurer::new();
        let mut s = spec("hello", Some("longer subtext"));
        s.check_align = ContentAlignment::MiddleLeft;
        let metrics = measure_item(&s, &m, &m);

        let expected = (metrics.size.height - 16) / 2;
        assert_eq!(metrics.glyph_pos.y, expected);
    }

    #[test]
    fn test_center_alignment_recenters_narrower_line() {
        let m = FixedMeasurer::new();
        let mut s = spec("wide text!", Some("sub"));
        s.glyph_size = Size::ZERO;
        s.text_align = ContentAlignment::TopCenter;
        let metrics = measure_item(&s, &m, &m);

        // Text: 10 chars = 80px; subtext: 3 chars = 24px, centered against it.
        assert_eq!(metrics.text_rect.left(), 0);
        assert_eq!(metrics.subtext_rect.left(), (80 - 24) / 2);
    }

    #[test]
    fn test_bottom_text_alignment_offsets_block() {
        let m = FixedMeasurer::new();
        let mut s = spec("hi", None);
        s.glyph_size = Size::new(16, 24);
        s.text_align = ContentAlignment::BottomLeft;
        let metrics = measure_item(&s, &m, &m);

        // The 24px glyph makes the item taller than the 16px text;
        // bottom-aligned text sits flush with the item's bottom edge.
        assert_eq!(metrics.size.height, 24);
        assert_eq!(metrics.text_rect.top(), 8);
        assert_eq!(metrics.text_rect.bottom(), metrics.size.height);
    }

    #[test]
    fn test_word_wrap_within_reserved_width() {
        let m = FixedMeasurer::new();
        let mut s = spec("abcdefghij", None); // 80px unwrapped
        s.max_width = 62; // 62 - 22 reserved = 40px -> 5 chars per line
        let metrics = measure_item(&s, &m, &m);

        assert_eq!(metrics.text_rect.height(), 32); // two lines
        assert!(metrics.size.width <= 62);
    }

    #[test]
    fn test_non_positive_width_tolerated() {
        let m = FixedMeasurer::new();
        let mut s = spec("abc", None);
        s.max_width = 10; // less than the 22px reservation
        let metrics = measure_item(&s, &m, &m);

        // Degenerate but valid: maximally wrapped text, no crash.
        assert_eq!(metrics.text_rect.width(), 8);
        assert_eq!(metrics.text_rect.height(), 3 * 16);
    }

    #[test]
    fn test_alignment_predicates() {
        assert!(ContentAlignment::TopCenter.is_top());
        assert!(ContentAlignment::TopCenter.is_center());
        assert!(ContentAlignment::BottomRight.is_bottom());
        assert!(ContentAlignment::BottomRight.is_right());
        assert!(ContentAlignment::MiddleLeft.is_middle());
        assert!(ContentAlignment::MiddleLeft.is_left());
    }

    #[test]
    fn test_alignment_mirroring() {
        assert_eq!(
            ContentAlignment::MiddleLeft.mirrored(),
            ContentAlignment::MiddleRight
        );
        assert_eq!(
            ContentAlignment::TopCenter.mirrored(),
            ContentAlignment::TopCenter
        );
    }
}
