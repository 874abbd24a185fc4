//! Column layout engine and the per-pass bounds table.
//!
//! [`ColumnLayoutEngine::run`] arranges a sequence of items into columns,
//! producing an absolute bounding rectangle for every item plus the overall
//! ideal content size (used for scroll extents and auto-sizing). Items fill
//! either across the columns first ([`RepeatDirection::Across`]) or down
//! each column first ([`RepeatDirection::Down`]); the latter balances
//! column heights with a two-pass split.
//!
//! The bounds table is rebuilt wholesale on every pass — column balancing
//! is a global property of the whole sequence, so there is no per-item
//! incremental update path. Each rebuild bumps a generation counter so
//! consumers can tell stale geometry from current.

use slat_core::{Edges, Rect, Size};
use tracing::{trace, warn};

/// The order in which items fill the column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatDirection {
    /// Row-major: each item goes to the next column, wrapping back to the
    /// first column after the last.
    Across,
    /// Column-major: items fill a column fully before advancing; column
    /// heights are balanced across the sequence.
    #[default]
    Down,
}

/// Immutable-per-pass snapshot of everything the engine needs besides the
/// items themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// The surface's client area size.
    pub client_size: Size,
    /// Padding around the whole item grid.
    pub padding: Edges,
    /// Horizontal gap between columns.
    pub horizontal_spacing: i32,
    /// Vertical gap between items in a column.
    pub vertical_spacing: i32,
    /// Number of columns. Values below 1 are clamped to 1.
    pub columns: usize,
    /// Fill order across the column grid.
    pub direction: RepeatDirection,
    /// When set, every item consumes the tallest item's height, making rows
    /// uniform; otherwise each item consumes only its own measured height.
    pub space_evenly: bool,
    /// When set, each column is as wide as its widest item; otherwise all
    /// columns share one width.
    pub variable_column_widths: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            client_size: Size::ZERO,
            padding: Edges::ZERO,
            horizontal_spacing: 6,
            vertical_spacing: 6,
            columns: 1,
            direction: RepeatDirection::Down,
            space_evenly: false,
            variable_column_widths: false,
        }
    }
}

/// Mapping from item index to absolute bounding rectangle, valid for one
/// layout generation.
///
/// Reads are lenient: an index with no entry returns `Rect::ZERO` rather
/// than erroring, so paint and hit-test code racing a structural change
/// degrades to a no-op instead of a fault.
#[derive(Debug, Default)]
pub struct ItemBoundsTable {
    bounds: Vec<Rect>,
    generation: u64,
}

impl ItemBoundsTable {
    /// Create an empty table at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the table for a new layout pass over `count` items.
    ///
    /// All entries become `Rect::ZERO` and the generation advances.
    pub fn begin_pass(&mut self, count: usize) {
        self.bounds.clear();
        self.bounds.resize(count, Rect::ZERO);
        self.generation += 1;
    }

    /// Store the bounds for an item. Indices past the pass count are
    /// ignored.
    pub fn set(&mut self, index: usize, rect: Rect) {
        if let Some(slot) = self.bounds.get_mut(index) {
            *slot = rect;
        }
    }

    /// The bounds for an item, or `Rect::ZERO` if the index has no entry.
    #[inline]
    pub fn get(&self, index: usize) -> Rect {
        self.bounds.get(index).copied().unwrap_or(Rect::ZERO)
    }

    /// Number of entries in the current generation.
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Whether the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// The current layout generation. Advances on every rebuild.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Iterate over all entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = Rect> + '_ {
        self.bounds.iter().copied()
    }

    /// Drop all entries and advance the generation.
    pub fn clear(&mut self) {
        self.bounds.clear();
        self.generation += 1;
    }
}

/// The column layout engine.
///
/// Stateless: all inputs arrive per call and the only output channel is
/// the caller's [`ItemBoundsTable`] plus the returned ideal size.
pub struct ColumnLayoutEngine;

impl ColumnLayoutEngine {
    /// Lay out `count` items, writing their bounds into `table` and
    /// returning the ideal content size.
    ///
    /// `measure` is invoked once per item with the width budget for its
    /// column; a non-positive budget is passed through (the measurer wraps
    /// maximally rather than failing). The table is fully rebuilt; entries
    /// from prior generations never survive.
    pub fn run(
        params: &LayoutParams,
        count: usize,
        measure: &mut dyn FnMut(usize, i32) -> Size,
        table: &mut ItemBoundsTable,
    ) -> Size {
        let pad = params.padding;

        if count == 0 {
            table.clear();
            return Size::new(pad.horizontal(), pad.vertical());
        }

        let columns = if params.columns == 0 {
            warn!(target: "slat::layout", "column count 0 clamped to 1");
            1
        } else {
            params.columns
        };

        table.begin_pass(count);

        // Width budget per column when all columns share the space evenly.
        let inner_width = params.client_size.width - pad.horizontal();
        let column_width =
            (inner_width - (columns as i32 - 1) * params.horizontal_spacing) / columns as i32;

        let sizes: Vec<Size> = (0..count).map(|i| measure(i, column_width)).collect();
        let max_item_height = sizes.iter().map(|s| s.height).max().unwrap_or(0);
        let item_height = |i: usize| -> i32 {
            if params.space_evenly {
                max_item_height
            } else {
                sizes[i].height
            }
        };

        let assignment = match params.direction {
            RepeatDirection::Across => assign_across(count, columns),
            RepeatDirection::Down => {
                assign_down(count, columns, params.vertical_spacing, &item_height)
            }
        };

        // Column widths. Uniform: every column is min(widest item, budget).
        // Variable: each column is as wide as its own widest item, bounded
        // by the budget since the client width is externally fixed.
        let max_min_width = sizes.iter().map(|s| s.width).max().unwrap_or(0);
        let widths: Vec<i32> = assignment
            .iter()
            .map(|members| {
                let min_w = if params.variable_column_widths {
                    members.iter().map(|&i| sizes[i].width).max().unwrap_or(0)
                } else {
                    max_min_width
                };
                if column_width > 0 {
                    min_w.min(column_width).max(0)
                } else {
                    min_w.max(0)
                }
            })
            .collect();

        let mut x = pad.left;
        let mut max_bottom = pad.top;
        for (members, &width) in assignment.iter().zip(widths.iter()) {
            // Columns with no members (count < columns) take no width and
            // no spacing.
            if members.is_empty() {
                continue;
            }
            let mut y = pad.top;
            for &i in members {
                let h = item_height(i);
                table.set(i, Rect::new(x, y, width, h));
                y += h + params.vertical_spacing;
            }
            max_bottom = max_bottom.max(y - params.vertical_spacing);
            x += width + params.horizontal_spacing;
        }

        let ideal = Size::new(
            x - params.horizontal_spacing + pad.right,
            max_bottom + pad.bottom,
        );
        trace!(
            target: "slat::layout",
            count,
            columns,
            generation = table.generation(),
            ideal_width = ideal.width,
            ideal_height = ideal.height,
            "layout pass complete"
        );
        ideal
    }
}

/// Row-major assignment: item `i` belongs to column `i % columns`.
fn assign_across(count: usize, columns: usize) -> Vec<Vec<usize>> {
    let mut assignment = vec![Vec::new(); columns];
    for i in 0..count {
        assignment[i % columns].push(i);
    }
    assignment
}

/// Column-major assignment with height balancing.
///
/// First pass treats the sequence as one tall column to learn the total
/// height; the split points are then chosen so each column's cumulative
/// height lands as close as possible to the remaining ideal. A split moves
/// before the current item only when stopping there is strictly closer to
/// the ideal than including it.
fn assign_down(
    count: usize,
    columns: usize,
    vertical_spacing: i32,
    item_height: &dyn Fn(usize) -> i32,
) -> Vec<Vec<usize>> {
    let mut assignment = vec![Vec::new(); columns];
    if columns == 1 {
        assignment[0] = (0..count).collect();
        return assignment;
    }

    // Each item's contribution to a column, trailing spacing included.
    let advance = |i: usize| item_height(i) + vertical_spacing;
    let mut remaining: i64 = (0..count).map(|i| advance(i) as i64).sum();

    let mut col = 0usize;
    let mut acc: i64 = 0;
    let mut ideal: i64 = remaining / columns as i64;
    for i in 0..count {
        let h = advance(i) as i64;
        if col + 1 < columns && acc > 0 {
            let dist_without = (ideal - acc).abs();
            let dist_with = (acc + h - ideal).abs();
            if dist_without < dist_with {
                // Close this column; rebalance the rest against what is
                // left of the sequence.
                col += 1;
                acc = 0;
                ideal = remaining / (columns - col) as i64;
            }
        }
        assignment[col].push(i);
        acc += h;
        remaining -= h;
    }

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(client: Size, columns: usize) -> LayoutParams {
        LayoutParams {
            client_size: client,
            padding: Edges::ZERO,
            horizontal_spacing: 6,
            vertical_spacing: 6,
            columns,
            direction: RepeatDirection::Down,
            space_evenly: false,
            variable_column_widths: false,
        }
    }

    /// Run the engine with fixed per-item sizes.
    fn run_fixed(params: &LayoutParams, sizes: &[Size]) -> (ItemBoundsTable, Size) {
        let mut table = ItemBoundsTable::new();
        let ideal = ColumnLayoutEngine::run(
            params,
            sizes.len(),
            &mut |i, _max_width| sizes[i],
            &mut table,
        );
        (table, ideal)
    }

    #[test]
    fn test_single_column_stacking() {
        // Heights 20, 30, 20 with 6px spacing: ideal height 82, item 1 at y=26.
        let p = params(Size::new(100, 200), 1);
        let sizes = [Size::new(80, 20), Size::new(80, 30), Size::new(80, 20)];
        let (table, ideal) = run_fixed(&p, &sizes);

        assert_eq!(ideal.height, 82);
        assert_eq!(table.get(0).top(), 0);
        assert_eq!(table.get(1).top(), 26);
        assert_eq!(table.get(2).top(), 62);
    }

    #[test]
    fn test_row_major_alternates_columns() {
        let mut p = params(Size::new(200, 200), 2);
        p.direction = RepeatDirection::Across;
        let sizes = [Size::new(50, 20); 6];
        let (table, _) = run_fixed(&p, &sizes);

        // Column 0 holds {0, 2, 4}; column 1 holds {1, 3, 5}.
        let col0_x = table.get(0).left();
        let col1_x = table.get(1).left();
        assert_ne!(col0_x, col1_x);
        for i in [0, 2, 4] {
            assert_eq!(table.get(i).left(), col0_x);
        }
        for i in [1, 3, 5] {
            assert_eq!(table.get(i).left(), col1_x);
        }
        // Rows line up.
        assert_eq!(table.get(0).top(), table.get(1).top());
        assert_eq!(table.get(2).top(), table.get(3).top());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let p = params(Size::new(200, 200), 3);
        let sizes: Vec<Size> = (0..10).map(|i| Size::new(40, 15 + (i % 4) * 7)).collect();
        let (a, ideal_a) = run_fixed(&p, &sizes);
        let (b, ideal_b) = run_fixed(&p, &sizes);

        assert_eq!(ideal_a, ideal_b);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_no_overlap_and_within_ideal() {
        for columns in 1..=4 {
            for direction in [RepeatDirection::Across, RepeatDirection::Down] {
                let mut p = params(Size::new(400, 400), columns);
                p.direction = direction;
                let sizes: Vec<Size> =
                    (0..9).map(|i| Size::new(30 + (i % 3) * 10, 10 + (i % 5) * 6)).collect();
                let (table, ideal) = run_fixed(&p, &sizes);

                let rects: Vec<Rect> = table.iter().collect();
                let extent = Rect::new(0, 0, ideal.width, ideal.height);
                for (i, a) in rects.iter().enumerate() {
                    assert!(
                        extent.contains_rect(a),
                        "item {i} {a:?} outside ideal {ideal:?} ({columns} cols, {direction:?})"
                    );
                    for (j, b) in rects.iter().enumerate().skip(i + 1) {
                        assert!(
                            a.intersect(b).is_none(),
                            "items {i} and {j} overlap ({columns} cols, {direction:?})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_column_balance_bound() {
        // n equal items over k columns: every column within one item of n/k.
        let n = 11;
        for k in 2..=4 {
            let p = params(Size::new(600, 400), k);
            let sizes = vec![Size::new(40, 20); n];
            let (table, _) = run_fixed(&p, &sizes);

            // Column membership recovered from x positions.
            let mut per_column = std::collections::HashMap::new();
            for i in 0..n {
                *per_column.entry(table.get(i).left()).or_insert(0usize) += 1;
            }
            let ideal = n as f64 / k as f64;
            for (&_x, &count) in &per_column {
                assert!(
                    (count as f64 - ideal).abs() <= 1.0,
                    "column holds {count} items, ideal {ideal} ({k} columns)"
                );
            }
            assert_eq!(per_column.len(), k);
        }
    }

    #[test]
    fn test_down_direction_keeps_sequence_contiguous() {
        let p = params(Size::new(300, 300), 2);
        let sizes = vec![Size::new(40, 20); 6];
        let (table, _) = run_fixed(&p, &sizes);

        // Column-major: {0,1,2} stack in column 0, {3,4,5} in column 1.
        for i in [0, 1, 2] {
            assert_eq!(table.get(i).left(), table.get(0).left());
        }
        for i in [3, 4, 5] {
            assert_eq!(table.get(i).left(), table.get(3).left());
        }
        assert_eq!(table.get(1).top(), 26);
        assert_eq!(table.get(4).top(), 26);
    }

    #[test]
    fn test_oversized_item_occupies_column_alone() {
        let p = params(Size::new(300, 300), 2);
        let sizes = [
            Size::new(40, 200),
            Size::new(40, 20),
            Size::new(40, 20),
        ];
        let (table, _) = run_fixed(&p, &sizes);

        // The giant item fills column 0; the rest move to column 1.
        assert_ne!(table.get(0).left(), table.get(1).left());
        assert_eq!(table.get(1).left(), table.get(2).left());
    }

    #[test]
    fn test_space_evenly_uniform_rows() {
        let mut p = params(Size::new(100, 300), 1);
        p.space_evenly = true;
        let sizes = [Size::new(40, 10), Size::new(40, 30), Size::new(40, 20)];
        let (table, ideal) = run_fixed(&p, &sizes);

        for i in 0..3 {
            assert_eq!(table.get(i).height(), 30);
        }
        assert_eq!(ideal.height, 30 * 3 + 6 * 2);
    }

    #[test]
    fn test_variable_column_widths() {
        let mut p = params(Size::new(400, 300), 2);
        p.variable_column_widths = true;
        // Column 0 gets items 0..=1 (narrow), column 1 gets 2..=3 (wide).
        let sizes = [
            Size::new(30, 20),
            Size::new(35, 20),
            Size::new(90, 20),
            Size::new(80, 20),
        ];
        let (table, ideal) = run_fixed(&p, &sizes);

        assert_eq!(table.get(0).width(), 35);
        assert_eq!(table.get(2).width(), 90);
        // Ideal width sums the two column widths plus spacing.
        assert_eq!(ideal.width, 35 + 6 + 90);
    }

    #[test]
    fn test_uniform_width_shared_by_all_columns() {
        let p = params(Size::new(400, 300), 2);
        let sizes = [
            Size::new(30, 20),
            Size::new(35, 20),
            Size::new(90, 20),
            Size::new(80, 20),
        ];
        let (table, _) = run_fixed(&p, &sizes);

        for i in 0..4 {
            assert_eq!(table.get(i).width(), 90);
        }
    }

    #[test]
    fn test_zero_items_collapses_to_padding() {
        let mut p = params(Size::new(100, 100), 2);
        p.padding = Edges::new(4, 8, 4, 8);
        let mut table = ItemBoundsTable::new();
        table.begin_pass(3); // stale entries from a previous pass

        let ideal = ColumnLayoutEngine::run(&p, 0, &mut |_, _| Size::ZERO, &mut table);
        assert_eq!(ideal, Size::new(8, 16));
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_columns_clamped() {
        let p = params(Size::new(100, 100), 0);
        let sizes = [Size::new(40, 20), Size::new(40, 20)];
        let (table, _) = run_fixed(&p, &sizes);

        // Behaves as a single column.
        assert_eq!(table.get(0).left(), table.get(1).left());
        assert_eq!(table.get(1).top(), 26);
    }

    #[test]
    fn test_too_many_columns_degenerate_width() {
        // 20 columns in 50px: width budget goes non-positive; the pass
        // still completes with valid (degenerate) geometry.
        let p = params(Size::new(50, 100), 20);
        let mut table = ItemBoundsTable::new();
        let mut observed_width = i32::MAX;
        let ideal = ColumnLayoutEngine::run(
            &p,
            2,
            &mut |_, max_width| {
                observed_width = observed_width.min(max_width);
                Size::new(5, 10)
            },
            &mut table,
        );

        assert!(observed_width <= 0);
        assert!(ideal.height >= 10);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unused_columns_add_no_width() {
        // One item in a three-column grid: the ideal width is the single
        // occupied column, not three columns plus two gaps.
        let p = params(Size::new(400, 300), 3);
        let sizes = [Size::new(40, 20)];
        let (table, ideal) = run_fixed(&p, &sizes);

        assert_eq!(table.get(0).width(), 40);
        assert_eq!(ideal.width, 40);

        // Two items row-major over three columns: two columns and one gap.
        let mut p = params(Size::new(400, 300), 3);
        p.direction = RepeatDirection::Across;
        let sizes = [Size::new(40, 20), Size::new(40, 20)];
        let (_, ideal) = run_fixed(&p, &sizes);
        assert_eq!(ideal.width, 40 + 6 + 40);
    }

    #[test]
    fn test_padding_offsets_grid() {
        let mut p = params(Size::new(200, 200), 1);
        p.padding = Edges::new(10, 12, 10, 12);
        let sizes = [Size::new(40, 20)];
        let (table, ideal) = run_fixed(&p, &sizes);

        assert_eq!(table.get(0).origin.x, 10);
        assert_eq!(table.get(0).origin.y, 12);
        assert_eq!(ideal.height, 12 + 20 + 12);
    }

    #[test]
    fn test_generation_advances_per_pass() {
        let p = params(Size::new(100, 100), 1);
        let mut table = ItemBoundsTable::new();
        let g0 = table.generation();
        ColumnLayoutEngine::run(&p, 1, &mut |_, _| Size::new(10, 10), &mut table);
        let g1 = table.generation();
        ColumnLayoutEngine::run(&p, 1, &mut |_, _| Size::new(10, 10), &mut table);
        assert!(g1 > g0);
        assert!(table.generation() > g1);
    }

    #[test]
    fn test_lenient_reads() {
        let table = ItemBoundsTable::new();
        assert_eq!(table.get(99), Rect::ZERO);
    }
}
