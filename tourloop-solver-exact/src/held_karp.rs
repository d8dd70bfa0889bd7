//! Held–Karp table over subsets of the non-anchor locations.
//!
//! The anchor is relabelled out of the bitmask universe, so a problem with
//! `n` locations works over `m = n - 1` nodes. Node `j` of the table stands
//! for the `j`-th location after removing the anchor, which keeps ascending
//! node order identical to ascending location order.

use std::collections::TryReserveError;

use tourloop_core::{CostMatrix, Tour};

/// Parent marker for single-node subsets.
const NO_PARENT: u8 = u8::MAX;

/// Bit positions set in `mask`, lowest first.
fn members(mask: usize) -> impl Iterator<Item = usize> {
    let mut rest = mask;
    std::iter::from_fn(move || {
        if rest == 0 {
            return None;
        }
        let bit = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        Some(bit)
    })
}

/// Every `m`-bit mask with exactly `size` bits set, in ascending order.
///
/// Uses Gosper's hack so callers can fill the table one population count at
/// a time; every predecessor state is complete before it is read.
fn masks_of_size(size: usize, m: usize) -> impl Iterator<Item = usize> {
    let limit = 1_usize << m;
    let mut next = (1_usize << size) - 1;
    std::iter::from_fn(move || {
        if size == 0 || next >= limit {
            return None;
        }
        let current = next;
        let lowest = current & current.wrapping_neg();
        let ripple = current + lowest;
        next = (((ripple ^ current) >> 2) >> lowest.trailing_zeros()) | ripple;
        Some(current)
    })
}

fn zeroed<T: Copy>(len: usize, fill: T) -> Result<Vec<T>, TryReserveError> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(len)?;
    cells.resize(len, fill);
    Ok(cells)
}

/// Flat arenas indexed by `(subset, last)`.
struct Table {
    nodes: usize,
    cost: Vec<f64>,
    parent: Vec<u8>,
}

impl Table {
    fn allocate(nodes: usize) -> Result<Self, TryReserveError> {
        let cells = (1_usize << nodes) * nodes;
        Ok(Self {
            nodes,
            cost: zeroed(cells, f64::INFINITY)?,
            parent: zeroed(cells, NO_PARENT)?,
        })
    }

    const fn cell(&self, mask: usize, last: usize) -> usize {
        mask * self.nodes + last
    }
}

/// Solve a validated problem with at least two locations.
///
/// Callers check `start` and the size ceiling first; the only failure left is
/// the allocator refusing the table.
///
/// The first candidate of every state is always recorded, so sums that
/// overflow to infinity still reconstruct a full permutation.
#[expect(
    clippy::float_arithmetic,
    reason = "path costs are accumulated in floating point"
)]
#[expect(
    clippy::indexing_slicing,
    reason = "cells and nodes are bounded by the table dimensions"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "node indices stay below MAX_SUPPORTED_LOCATIONS"
)]
pub(crate) fn optimal_tour(matrix: &CostMatrix, start: usize) -> Result<Tour, TryReserveError> {
    let locations: Vec<usize> = (0..matrix.size()).filter(|&i| i != start).collect();
    let m = locations.len();
    let mut table = Table::allocate(m)?;

    for (j, &location) in locations.iter().enumerate() {
        let cell = table.cell(1 << j, j);
        table.cost[cell] = matrix.cost(start, location);
    }

    for size in 2..=m {
        for mask in masks_of_size(size, m) {
            for j in members(mask) {
                let without = mask & !(1 << j);
                let mut best = f64::INFINITY;
                let mut best_parent = NO_PARENT;
                for k in members(without) {
                    let candidate = table.cost[table.cell(without, k)]
                        + matrix.cost(locations[k], locations[j]);
                    if best_parent == NO_PARENT || candidate < best {
                        best = candidate;
                        best_parent = k as u8;
                    }
                }
                let cell = table.cell(mask, j);
                table.cost[cell] = best;
                table.parent[cell] = best_parent;
            }
        }
    }

    let full = (1_usize << m) - 1;
    let mut closing: Option<(usize, f64)> = None;
    for (j, &location) in locations.iter().enumerate() {
        let candidate = table.cost[table.cell(full, j)] + matrix.cost(location, start);
        if closing.is_none_or(|(_, best)| candidate < best) {
            closing = Some((j, candidate));
        }
    }
    let (last, total_cost) = closing.unwrap_or((0, f64::INFINITY));

    let mut order = Vec::with_capacity(matrix.size());
    let mut mask = full;
    let mut node = last;
    loop {
        order.push(locations[node]);
        let parent = table.parent[table.cell(mask, node)];
        mask &= !(1 << node);
        if parent == NO_PARENT {
            break;
        }
        node = usize::from(parent);
    }
    order.push(start);
    order.reverse();

    Ok(Tour::new(order, total_cost))
}
