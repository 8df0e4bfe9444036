//! Urgency styling for the floating countdown text.

/// Fill color while more than ten ticks remain.
pub const FILL_CALM: u32 = 0x00ff00;
/// Fill color once ten or fewer ticks remain.
pub const FILL_URGENT: u32 = 0xff0000;
/// Stroke color, always black.
pub const STROKE: u32 = 0x000000;

/// Where the floating text attaches relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAnchor {
    CenterTop,
    Center,
    CenterBottom,
}

/// Scroll distance of the floating text: twice the token's rendered height.
pub fn anchor_distance(token_height: f64) -> f64 {
    2.0 * token_height
}

/// Style applied to one floating countdown number.
///
/// Font size and fill are a pure function of the remaining tick count; the
/// stroke and anchor never vary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountdownStyle {
    pub font_size: u32,
    pub fill: u32,
    pub stroke: u32,
    pub stroke_thickness: u32,
    pub anchor: TextAnchor,
}

impl CountdownStyle {
    /// Selects the urgency styling for a remaining tick count.
    ///
    /// | remaining | font size | fill |
    /// |-----------|-----------|------|
    /// | <= 3      | 64        | red  |
    /// | 4..=10    | 48        | red  |
    /// | > 10      | 28        | green |
    pub fn for_remaining(remaining: i64) -> Self {
        let font_size = if remaining <= 3 {
            64
        } else if remaining <= 10 {
            48
        } else {
            28
        };
        let fill = if remaining > 10 { FILL_CALM } else { FILL_URGENT };

        Self {
            font_size,
            fill,
            stroke: STROKE,
            stroke_thickness: 4,
            anchor: TextAnchor::CenterTop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_boundaries_are_exact() {
        let at_3 = CountdownStyle::for_remaining(3);
        assert_eq!(at_3.font_size, 64);
        assert_eq!(at_3.fill, FILL_URGENT);

        let at_4 = CountdownStyle::for_remaining(4);
        assert_eq!(at_4.font_size, 48);
        assert_eq!(at_4.fill, FILL_URGENT);

        let at_10 = CountdownStyle::for_remaining(10);
        assert_eq!(at_10.font_size, 48);
        assert_eq!(at_10.fill, FILL_URGENT);

        let at_11 = CountdownStyle::for_remaining(11);
        assert_eq!(at_11.font_size, 28);
        assert_eq!(at_11.fill, FILL_CALM);
    }

    #[test]
    fn stroke_and_anchor_never_vary() {
        for remaining in [1, 3, 4, 10, 11, 100] {
            let style = CountdownStyle::for_remaining(remaining);
            assert_eq!(style.stroke, STROKE);
            assert_eq!(style.stroke_thickness, 4);
            assert_eq!(style.anchor, TextAnchor::CenterTop);
        }
    }

    #[test]
    fn anchor_distance_is_twice_token_height() {
        assert_eq!(anchor_distance(50.0), 100.0);
    }
}
