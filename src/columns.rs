//! Picking a subject's columns out of the grid and pairing them up into
//! X/Y/Z position triplets.

use crate::grid::{Column, Grid};
use crate::header::{HeaderLayout, NAME_TOKEN, POSITION_TOKEN};

/// One marker's X, Y and Z columns, in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTriplet {
    pub x: Column,
    pub y: Column,
    pub z: Column,
}

/// Result of a triplet scan over one subject's columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripletScan {
    pub triplets: Vec<XyzTriplet>,
    /// Columns that ended up in no triplet.
    pub skipped_columns: usize,
}

/// All columns whose name-row cell is exactly `label`, in file order.
pub fn select_columns(grid: &Grid, name_row: usize, label: &str) -> Vec<Column> {
    let Some(names) = grid.row(name_row) else {
        return Vec::new();
    };
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() == label)
        .map(|(idx, _)| grid.column(idx))
        .collect()
}

/// The column labelled "Name" in the name row. The last one wins.
pub fn select_time_column(grid: &Grid, name_row: usize) -> Option<Column> {
    grid.row(name_row)?
        .iter()
        .rposition(|name| name == NAME_TOKEN)
        .map(|idx| grid.column(idx))
}

/// Groups consecutive columns into triplets tagged
/// (Position, X), (_, Y), (_, Z). The scan moves one column at a time,
/// so overlapping triplets are kept as found.
pub fn assemble_triplets(columns: &[Column], name_row: usize, layout: &HeaderLayout) -> TripletScan {
    let kind_row = layout.kind_row(name_row);
    let axis_row = layout.axis_row(name_row);

    let mut used = vec![false; columns.len()];
    let mut triplets = Vec::new();

    for (i, win) in columns.windows(3).enumerate() {
        let (cx, cy, cz) = (&win[0], &win[1], &win[2]);
        if cx.cell(kind_row) == POSITION_TOKEN
            && cx.cell(axis_row) == "X"
            && cy.cell(axis_row) == "Y"
            && cz.cell(axis_row) == "Z"
        {
            used[i..i + 3].iter_mut().for_each(|u| *u = true);
            triplets.push(XyzTriplet {
                x: cx.clone(),
                y: cy.clone(),
                z: cz.clone(),
            });
        }
    }

    let skipped_columns = used.iter().filter(|u| !**u).count();
    TripletScan {
        triplets,
        skipped_columns,
    }
}
