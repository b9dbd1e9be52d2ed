//! Layout composition — pure functions from (layout, columns, gap, index) to
//! style descriptors.
//!
//! Two code paths exist on purpose and must not be merged:
//!
//! - **Publish/render path** ([`style_for`]): everything is a deterministic
//!   function of the item's ordinal index. Re-rendering a published album is
//!   visually stable — the same photo always gets the same scrapbook tilt.
//! - **Authoring preview path** ([`preview_style_for`]): rotation is truly
//!   random per render. Nothing from this path is ever persisted, so the
//!   drift is harmless and gives the working canvas a livelier feel.
//!
//! Columns and gap are clamped defensively to their valid ranges; the
//! authoring UI never produces out-of-range values, but the engine does not
//! rely on that.

use crate::album::Layout;

/// Valid column range for all layouts.
pub const COLUMN_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
/// Valid gap range for all layouts.
pub const GAP_RANGE: std::ops::RangeInclusive<u8> = 0..=8;

/// Scrapbook rotation cycle, degrees. Indexed by `index % 6`.
const ROTATIONS: [i32; 6] = [-8, -5, -2, 2, 5, 8];

/// Clamp a column count into [`COLUMN_RANGE`].
pub fn clamp_columns(columns: u8) -> u8 {
    columns.clamp(*COLUMN_RANGE.start(), *COLUMN_RANGE.end())
}

/// Clamp a gap step into [`GAP_RANGE`].
pub fn clamp_gap(gap: u8) -> u8 {
    gap.min(*GAP_RANGE.end())
}

/// Border treatment for scrapbook items. Ordered 4-cycle indexed by
/// `index % 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderVariant {
    ThinWhite,
    ThinYellow,
    ThinOrange,
    ThickWhite,
}

impl BorderVariant {
    const CYCLE: [BorderVariant; 4] = [
        BorderVariant::ThinWhite,
        BorderVariant::ThinYellow,
        BorderVariant::ThinOrange,
        BorderVariant::ThickWhite,
    ];

    /// The variant for a given ordinal index.
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    /// Class string for this variant.
    pub fn class(self) -> &'static str {
        match self {
            BorderVariant::ThinWhite => "border-4 border-white shadow-lg",
            BorderVariant::ThinYellow => "border-4 border-yellow-100 shadow-lg",
            BorderVariant::ThinOrange => "border-4 border-orange-100 shadow-lg",
            BorderVariant::ThickWhite => "border-8 border-white shadow-lg",
        }
    }
}

/// Per-item placement/style descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStyle {
    pub rotation_degrees: i32,
    pub border: Option<BorderVariant>,
}

impl ItemStyle {
    /// The neutral style used by every non-scrapbook layout.
    pub const NEUTRAL: ItemStyle = ItemStyle {
        rotation_degrees: 0,
        border: None,
    };
}

/// Style for an item on the **published** render path.
///
/// Deterministic: depends only on `layout` and `index`. Scrapbook rotation
/// cycles through a fixed set of angles; everything else is neutral.
pub fn style_for(layout: Layout, index: usize) -> ItemStyle {
    match layout {
        Layout::Scrapbook => ItemStyle {
            rotation_degrees: ROTATIONS[index % ROTATIONS.len()],
            border: Some(BorderVariant::for_index(index)),
        },
        _ => ItemStyle::NEUTRAL,
    }
}

/// Style for an item on the **authoring preview** path.
///
/// Scrapbook rotation is a fresh random angle in [-10, 10) every call; the
/// border still cycles by index. Never used for persisted albums.
pub fn preview_style_for(layout: Layout, index: usize) -> ItemStyle {
    match layout {
        Layout::Scrapbook => ItemStyle {
            rotation_degrees: fastrand::i32(-10..10),
            border: Some(BorderVariant::for_index(index)),
        },
        _ => ItemStyle::NEUTRAL,
    }
}

/// Container class describing the structural arrangement for a layout.
///
/// Pure mapping; out-of-range `columns`/`gap` are clamped.
pub fn container_class(layout: Layout, columns: u8, gap: u8) -> String {
    let columns = clamp_columns(columns);
    let gap = clamp_gap(gap);
    match layout {
        Layout::Grid | Layout::Scrapbook => {
            format!("grid grid-cols-{columns} gap-{gap}")
        }
        Layout::Masonry => format!("columns-{columns} gap-{gap} space-y-{gap}"),
        Layout::Rows => format!("flex flex-col gap-{gap}"),
        Layout::Columns => format!("flex flex-row gap-{gap} overflow-x-auto"),
    }
}

/// Per-item structural class for a layout.
pub fn item_class(layout: Layout) -> &'static str {
    match layout {
        Layout::Grid => "aspect-square object-cover w-full h-full",
        Layout::Masonry => "w-full mb-4",
        Layout::Rows => "w-full max-w-3xl",
        Layout::Columns => "h-64 flex-shrink-0",
        Layout::Scrapbook => "w-full h-full object-cover",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Published path: determinism
    // =========================================================================

    #[test]
    fn scrapbook_style_is_deterministic() {
        for index in 0..50 {
            let a = style_for(Layout::Scrapbook, index);
            let b = style_for(Layout::Scrapbook, index);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn scrapbook_rotation_cycles_with_period_six() {
        let first_cycle: Vec<i32> = (0..6)
            .map(|i| style_for(Layout::Scrapbook, i).rotation_degrees)
            .collect();
        assert_eq!(first_cycle, vec![-8, -5, -2, 2, 5, 8]);

        // The full sequence repeats exactly.
        for i in 0..24 {
            assert_eq!(
                style_for(Layout::Scrapbook, i).rotation_degrees,
                first_cycle[i % 6]
            );
        }
    }

    #[test]
    fn scrapbook_border_cycles_with_period_four() {
        assert_eq!(
            style_for(Layout::Scrapbook, 0).border,
            Some(BorderVariant::ThinWhite)
        );
        assert_eq!(
            style_for(Layout::Scrapbook, 3).border,
            Some(BorderVariant::ThickWhite)
        );
        assert_eq!(
            style_for(Layout::Scrapbook, 4).border,
            Some(BorderVariant::ThinWhite)
        );
    }

    #[test]
    fn non_scrapbook_layouts_are_neutral() {
        for layout in [Layout::Grid, Layout::Masonry, Layout::Rows, Layout::Columns] {
            for index in 0..10 {
                assert_eq!(style_for(layout, index), ItemStyle::NEUTRAL);
            }
        }
    }

    // =========================================================================
    // Preview path
    // =========================================================================

    #[test]
    fn preview_rotation_stays_in_range() {
        for index in 0..200 {
            let style = preview_style_for(Layout::Scrapbook, index);
            assert!((-10..10).contains(&style.rotation_degrees));
        }
    }

    #[test]
    fn preview_border_is_still_deterministic() {
        assert_eq!(
            preview_style_for(Layout::Scrapbook, 1).border,
            Some(BorderVariant::ThinYellow)
        );
        assert_eq!(
            preview_style_for(Layout::Scrapbook, 5).border,
            Some(BorderVariant::ThinYellow)
        );
    }

    #[test]
    fn preview_non_scrapbook_is_neutral() {
        assert_eq!(preview_style_for(Layout::Grid, 7), ItemStyle::NEUTRAL);
    }

    // =========================================================================
    // Container classes
    // =========================================================================

    #[test]
    fn container_class_per_layout() {
        assert_eq!(container_class(Layout::Grid, 3, 2), "grid grid-cols-3 gap-2");
        assert_eq!(
            container_class(Layout::Masonry, 4, 1),
            "columns-4 gap-1 space-y-1"
        );
        assert_eq!(container_class(Layout::Rows, 3, 2), "flex flex-col gap-2");
        assert_eq!(
            container_class(Layout::Columns, 3, 2),
            "flex flex-row gap-2 overflow-x-auto"
        );
        assert_eq!(
            container_class(Layout::Scrapbook, 3, 2),
            "grid grid-cols-3 gap-2"
        );
    }

    #[test]
    fn container_class_clamps_out_of_range_values() {
        assert_eq!(container_class(Layout::Grid, 0, 2), "grid grid-cols-1 gap-2");
        assert_eq!(container_class(Layout::Grid, 9, 2), "grid grid-cols-5 gap-2");
        assert_eq!(container_class(Layout::Grid, 3, 99), "grid grid-cols-3 gap-8");
    }

    #[test]
    fn item_class_per_layout() {
        assert_eq!(item_class(Layout::Grid), "aspect-square object-cover w-full h-full");
        assert_eq!(item_class(Layout::Columns), "h-64 flex-shrink-0");
    }
}
