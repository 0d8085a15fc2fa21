use crate::layer_key::{LayerKey, OpKind};
use crate::pointer::PointerEvent;
use probelens_protocol::catalog::ResidualVariable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// One slot in the layer x kind matrix. A cell without a key has no
/// direction in the catalog and never takes part in interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub key: Option<String>,
    pub selected: bool,
    pub previewed: bool,
}

impl GridCell {
    pub fn enabled(&self) -> bool {
        self.key.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    Adding,
    Removing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridDrag {
    #[default]
    Idle,
    Dragging {
        anchor: (usize, usize),
        mode: SelectMode,
    },
}

/// Rectangle drag-selection over the intervention-point grid. Rows are
/// distinct layer indices in ascending order; columns are the four fixed
/// operation kinds. The selection set is keyed by the raw catalog strings,
/// so membership survives a rebuild for any key the new catalog still has.
#[derive(Debug, Clone, Default)]
pub struct GridSelectionController {
    rows: Vec<usize>,
    cells: Vec<Vec<GridCell>>,
    selection: HashSet<String>,
    drag: GridDrag,
}

impl GridSelectionController {
    pub fn from_catalog(catalog: &ResidualVariable) -> Self {
        let mut controller = Self::default();
        controller.rebuild(catalog);
        controller
    }

    /// Rebuild the cell matrix for a catalog. Selection membership is kept
    /// for keys that still exist and silently dropped for the rest. An
    /// empty or fully unparseable catalog yields an empty grid.
    pub fn rebuild(&mut self, catalog: &ResidualVariable) {
        let mut parsed: Vec<(&String, LayerKey)> = Vec::new();
        for raw in catalog.directions.keys() {
            match LayerKey::parse(raw) {
                Some(key) => parsed.push((raw, key)),
                None => warn!("Skipping unrecognized layer key '{}'", raw),
            }
        }

        let mut layers: Vec<usize> = parsed.iter().map(|(_, k)| k.layer).collect();
        layers.sort_unstable();
        layers.dedup();

        let mut cells = vec![vec![GridCell::default(); OpKind::COUNT]; layers.len()];
        for (raw, key) in &parsed {
            // binary_search cannot miss: `layers` was built from these keys
            if let Ok(row) = layers.binary_search(&key.layer) {
                cells[row][key.kind.column()].key = Some((*raw).clone());
            }
        }

        self.selection.retain(|k| catalog.contains_key(k));
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                if let Some(key) = &cell.key {
                    cell.selected = self.selection.contains(key);
                }
            }
        }

        self.rows = layers;
        self.cells = cells;
        self.drag = GridDrag::Idle;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        OpKind::COUNT
    }

    /// Layer index shown in a given row.
    pub fn layer_for_row(&self, row: usize) -> Option<usize> {
        self.rows.get(row).copied()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn drag(&self) -> GridDrag {
        self.drag
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Selected keys in (layer, column) order for stable serialized output.
    pub fn selected_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for row in &self.cells {
            for cell in row {
                if cell.selected {
                    if let Some(key) = &cell.key {
                        keys.push(key.clone());
                    }
                }
            }
        }
        keys
    }

    /// Begin a drag on an enabled cell. The whole gesture adds when the
    /// anchor cell is unselected and removes when it is selected.
    pub fn pointer_down(&mut self, row: usize, col: usize) {
        let (enabled, selected) = match self.cell(row, col) {
            Some(cell) => (cell.enabled(), cell.selected),
            None => return,
        };
        if !enabled {
            return;
        }

        let mode = if selected {
            SelectMode::Removing
        } else {
            SelectMode::Adding
        };
        self.drag = GridDrag::Dragging {
            anchor: (row, col),
            mode,
        };
        self.preview_rect((row, col), (row, col));
    }

    /// Extend the preview rectangle toward the pointer. Positions past the
    /// grid edge clamp to the nearest cell so the rectangle tracks a
    /// pointer that overshoots while dragging.
    pub fn pointer_move(&mut self, row: usize, col: usize) {
        let GridDrag::Dragging { anchor, .. } = self.drag else {
            return;
        };
        if self.cells.is_empty() {
            return;
        }

        let row = row.min(self.cells.len() - 1);
        let col = col.min(OpKind::COUNT - 1);
        self.preview_rect(anchor, (row, col));
    }

    /// Commit the previewed rectangle and return to idle. A click without
    /// movement is the 1x1 case of the same path.
    pub fn pointer_up(&mut self) {
        if let GridDrag::Dragging { mode, .. } = self.drag {
            for row in self.cells.iter_mut() {
                for cell in row.iter_mut() {
                    if !cell.previewed {
                        continue;
                    }
                    cell.previewed = false;

                    let Some(key) = &cell.key else {
                        continue;
                    };
                    match mode {
                        SelectMode::Adding => {
                            cell.selected = true;
                            self.selection.insert(key.clone());
                        }
                        SelectMode::Removing => {
                            cell.selected = false;
                            self.selection.remove(key);
                        }
                    }
                }
            }
        }
        self.drag = GridDrag::Idle;
    }

    /// Preview marks are purely visual; a cancelled gesture throws them
    /// away and leaves the selection as it was.
    pub fn pointer_cancel(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.previewed = false;
            }
        }
        self.drag = GridDrag::Idle;
    }

    /// Feed one logical pointer event carrying (row, col).
    pub fn handle(&mut self, event: PointerEvent<(usize, usize)>) {
        match event {
            PointerEvent::Down((row, col)) => self.pointer_down(row, col),
            PointerEvent::Move((row, col)) => self.pointer_move(row, col),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    fn preview_rect(&mut self, a: (usize, usize), b: (usize, usize)) {
        let (r0, r1) = (a.0.min(b.0), a.0.max(b.0));
        let (c0, c1) = (a.1.min(b.1), a.1.max(b.1));

        for (r, row) in self.cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                cell.previewed =
                    cell.enabled() && r >= r0 && r <= r1 && c >= c0 && c <= c1;
            }
        }
    }
}
