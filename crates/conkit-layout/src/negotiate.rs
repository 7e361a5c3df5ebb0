//! Iterative column-width negotiation.
//!
//! Negotiation decides how much horizontal space each column receives:
//!
//! 1. every column starts at its natural width (widest cell or heading,
//!    clamped to its bounds); if that fits, any leftover goes to
//!    proportional columns;
//! 2. under pressure, auto columns shrink by allowing their cells to
//!    wrap: the per-cell line limit rises step by step, and at each step
//!    the narrowest width honouring the limit is found by binary search;
//! 3. if no line limit fits, the rightmost non-fixed column is moved out
//!    of the grid into the stacked section and negotiation restarts.
//!
//! Fixed columns are never resized and never stacked. The process is
//! deterministic: identical inputs settle on identical widths.

use crate::column::{ColumnSpec, ColumnWidth};
use conkit_text::{max_line_width, measure_height};
use tracing::debug;

/// Upper bound on the per-cell line limit explored while shrinking.
/// Beyond this, stacking reads better than ever-narrower columns.
pub(crate) const MAX_CELL_LINES: usize = 4;

/// Outcome of a negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    /// `(column index, width)` for columns that stay in the grid, in
    /// original column order.
    pub grid: Vec<(usize, usize)>,
    /// Indexes of columns moved to the stacked section, ascending.
    pub stacked: Vec<usize>,
}

impl Negotiated {
    /// Total visible width of the grid, separators included.
    pub fn grid_width(&self, separator_width: usize) -> usize {
        if self.grid.is_empty() {
            return 0;
        }
        let widths: usize = self.grid.iter().map(|&(_, w)| w).sum();
        widths + separator_width * (self.grid.len() - 1)
    }
}

/// Negotiates column widths for the given content.
///
/// `contents` holds, per column, every string the column must display
/// (cells, plus the heading when headings are shown).
pub fn negotiate(
    specs: &[ColumnSpec],
    contents: &[Vec<&str>],
    available: usize,
    separator_width: usize,
) -> Negotiated {
    debug_assert_eq!(specs.len(), contents.len());

    let mut active: Vec<usize> = (0..specs.len()).collect();
    let mut stacked: Vec<usize> = Vec::new();

    while !active.is_empty() {
        if let Some(widths) = try_fit(specs, contents, &active, available, separator_width) {
            debug!(?widths, ?stacked, available, "column negotiation settled");
            stacked.sort_unstable();
            return Negotiated {
                grid: active.into_iter().zip(widths).collect(),
                stacked,
            };
        }

        match active.iter().rposition(|&i| !specs[i].is_fixed()) {
            Some(pos) => stacked.push(active.remove(pos)),
            None => {
                // Only fixed columns remain; they keep their widths even
                // though the grid overflows.
                let widths: Vec<usize> = active
                    .iter()
                    .map(|&i| match specs[i].width {
                        ColumnWidth::Fixed(w) => w,
                        _ => specs[i].min_width,
                    })
                    .collect();
                debug!(?widths, available, "fixed columns overflow the available width");
                stacked.sort_unstable();
                return Negotiated {
                    grid: active.into_iter().zip(widths).collect(),
                    stacked,
                };
            }
        }
    }

    stacked.sort_unstable();
    Negotiated {
        grid: Vec::new(),
        stacked,
    }
}

/// Attempts to fit the active columns into `available`, returning their
/// widths on success.
fn try_fit(
    specs: &[ColumnSpec],
    contents: &[Vec<&str>],
    active: &[usize],
    available: usize,
    separator_width: usize,
) -> Option<Vec<usize>> {
    let seps = separator_width * active.len().saturating_sub(1);
    let budget = available.checked_sub(seps)?;

    let naturals: Vec<usize> = active
        .iter()
        .map(|&i| {
            contents[i]
                .iter()
                .map(|cell| max_line_width(cell))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let ideals: Vec<usize> = active
        .iter()
        .zip(&naturals)
        .map(|(&i, &natural)| match specs[i].width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Auto => specs[i].clamp_natural(natural),
            // Proportional columns occupy their minimum footprint and
            // grow from the leftover during distribution.
            ColumnWidth::Proportional(_) => specs[i].min_width,
        })
        .collect();

    if ideals.iter().sum::<usize>() <= budget {
        return Some(distribute(specs, active, ideals.clone(), &ideals, budget));
    }

    for limit in 2..=MAX_CELL_LINES {
        let widths: Vec<usize> = active
            .iter()
            .enumerate()
            .map(|(k, &i)| match specs[i].width {
                ColumnWidth::Auto => shrunk_width(&specs[i], &contents[i], limit).min(ideals[k]),
                _ => ideals[k],
            })
            .collect();

        if widths.iter().sum::<usize>() <= budget {
            return Some(distribute(specs, active, widths, &ideals, budget));
        }
    }

    None
}

/// Narrowest width at which every cell of the column wraps within
/// `limit` lines, clamped to the column's bounds.
fn shrunk_width(spec: &ColumnSpec, cells: &[&str], limit: usize) -> usize {
    let shrunk = cells
        .iter()
        .map(|cell| cell_width_for_lines(cell, limit))
        .max()
        .unwrap_or(0);
    spec.clamp_natural(shrunk)
}

/// Binary search for the smallest width keeping `cell` within `limit`
/// wrapped lines. Wrap height is non-increasing in width, which makes
/// the predicate monotone.
fn cell_width_for_lines(cell: &str, limit: usize) -> usize {
    let natural = max_line_width(cell);
    if natural == 0 {
        return 0;
    }
    if measure_height(cell, natural) > limit {
        // More explicit lines than the limit allows; width cannot help.
        return natural;
    }

    let (mut lo, mut hi) = (1usize, natural);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if measure_height(cell, mid) <= limit {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Hands leftover width to proportional columns (by weight), or failing
/// that back to auto columns up to their natural width.
fn distribute(
    specs: &[ColumnSpec],
    active: &[usize],
    mut widths: Vec<usize>,
    ideals: &[usize],
    budget: usize,
) -> Vec<usize> {
    let used: usize = widths.iter().sum();
    let mut leftover = budget.saturating_sub(used);
    if leftover == 0 {
        return widths;
    }

    let proportional: Vec<(usize, f64)> = active
        .iter()
        .enumerate()
        .filter_map(|(k, &i)| match specs[i].width {
            ColumnWidth::Proportional(weight) => Some((k, weight)),
            _ => None,
        })
        .collect();

    if !proportional.is_empty() {
        let total: f64 = proportional.iter().map(|&(_, w)| w).sum();
        let mut given = 0usize;
        let shares: Vec<usize> = proportional
            .iter()
            .map(|&(_, weight)| {
                let share = ((leftover as f64) * weight / total).floor() as usize;
                given += share;
                share
            })
            .collect();

        let mut remainder = leftover - given;
        for (slot, &(k, _)) in proportional.iter().enumerate() {
            widths[k] += shares[slot];
            if remainder > 0 {
                widths[k] += 1;
                remainder -= 1;
            }
        }
        return widths;
    }

    // No proportional columns: relax shrunken auto columns back toward
    // their natural widths, left to right.
    for (k, &i) in active.iter().enumerate() {
        if leftover == 0 {
            break;
        }
        if matches!(specs[i].width, ColumnWidth::Auto) {
            let headroom = ideals[k].saturating_sub(widths[k]);
            let growth = headroom.min(leftover);
            widths[k] += growth;
            leftover -= growth;
        }
    }
    widths
}
