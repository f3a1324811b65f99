//! Stall catalog view contract.
//!
//! [`GridView::build`] is a pure function of (stalls, layout, selection,
//! locks): every coordinate in the layout gets exactly one draw state, and
//! [`GridView::click`] decides whether a tap on a cell may emit a
//! selection toggle. No state lives here; the store owns mutation.

use std::collections::{HashMap, HashSet};

use crate::models::{Layout, Stall, StallStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// No stall configured at this coordinate; non-interactive placeholder.
    Absent,
    /// Sold. Rendered struck-through, never clickable.
    Booked,
    /// Held by someone else right now.
    HeldByOther,
    /// Part of the current user's active hold; frozen until release/expiry.
    HeldByYou,
    /// In the local selection, not yet locked. Click toggles it off.
    Selected,
    /// Free. Click toggles it on, unless a hold is active.
    Available,
}

#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    pub state: CellState,
    pub stall: Option<&'a Stall>,
}

#[derive(Debug)]
pub struct GridView<'a> {
    layout: Layout,
    hold_active: bool,
    cells: Vec<Cell<'a>>,
}

impl<'a> GridView<'a> {
    /// Coordinate population wins over the stall list: records outside the
    /// layout bounds are dropped, coordinates without a record are absent.
    /// The first record claiming a coordinate keeps it.
    pub fn build(
        stalls: &'a [Stall],
        layout: Layout,
        selection: &[Stall],
        locked: &[String],
    ) -> Self {
        let rows = layout.rows.max(0);
        let columns = layout.columns.max(0);

        let mut by_coord: HashMap<(i32, i32), &'a Stall> = HashMap::new();
        for stall in stalls {
            if (1..=rows).contains(&stall.row) && (1..=columns).contains(&stall.column) {
                by_coord.entry((stall.row, stall.column)).or_insert(stall);
            }
        }

        let selected: HashSet<&str> = selection.iter().map(|s| s.stall_id.as_str()).collect();
        let held: HashSet<&str> = locked.iter().map(String::as_str).collect();

        let mut cells = Vec::with_capacity((rows * columns) as usize);
        for row in 1..=rows {
            for column in 1..=columns {
                cells.push(match by_coord.get(&(row, column)) {
                    None => Cell {
                        state: CellState::Absent,
                        stall: None,
                    },
                    Some(&stall) => match stall.status {
                        StallStatus::Inactive => Cell {
                            state: CellState::Absent,
                            stall: None,
                        },
                        StallStatus::Booked => Cell {
                            state: CellState::Booked,
                            stall: Some(stall),
                        },
                        StallStatus::LockedOther => Cell {
                            state: CellState::HeldByOther,
                            stall: Some(stall),
                        },
                        StallStatus::Available => {
                            let state = if held.contains(stall.stall_id.as_str()) {
                                CellState::HeldByYou
                            } else if selected.contains(stall.stall_id.as_str()) {
                                CellState::Selected
                            } else {
                                CellState::Available
                            };
                            Cell {
                                state,
                                stall: Some(stall),
                            }
                        }
                    },
                });
            }
        }

        Self {
            layout: Layout { rows, columns },
            hold_active: !held.is_empty(),
            cells,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn cell(&self, row: i32, column: i32) -> Option<Cell<'a>> {
        if !(1..=self.layout.rows).contains(&row) || !(1..=self.layout.columns).contains(&column) {
            return None;
        }
        let index = ((row - 1) * self.layout.columns + (column - 1)) as usize;
        self.cells.get(index).copied()
    }

    /// Cells in row-major order, one slice per grid row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell<'a>]> {
        self.cells.chunks(self.layout.columns.max(1) as usize)
    }

    /// Resolves a tap. Returns the stall whose selection should toggle, or
    /// `None` for every ineligible cell, including out-of-bounds taps and
    /// available cells while a hold is active. Never panics, never mutates.
    pub fn click(&self, row: i32, column: i32) -> Option<&'a Stall> {
        let cell = self.cell(row, column)?;
        match cell.state {
            CellState::Selected => cell.stall,
            CellState::Available if !self.hold_active => cell.stall,
            _ => None,
        }
    }
}
