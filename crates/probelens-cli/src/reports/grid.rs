use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use probelens_core::layer_key::OpKind;
use probelens_core::panel::VisualizationPanel;
use strum::IntoEnumIterator;

/// Print the intervention grid: one row per layer, one column per kind.
/// `[x]` selected, `[ ]` selectable, blank where the catalog has no key.
pub fn print_grid(panel: &VisualizationPanel) {
    let grid = panel.grid();
    println!("\nIntervention grid ({} layers):", grid.row_count());

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = vec![Cell::new("Layer")];
    for kind in OpKind::iter() {
        header.push(Cell::new(kind.to_string()).set_alignment(CellAlignment::Center));
    }
    table.add_row(header);

    for row in 0..grid.row_count() {
        let layer = grid.layer_for_row(row).unwrap_or(row);
        let mut cells = vec![Cell::new(layer.to_string())];
        for col in 0..grid.col_count() {
            let mark = match grid.cell(row, col) {
                Some(cell) if cell.selected => "[x]",
                Some(cell) if cell.enabled() => "[ ]",
                _ => "",
            };
            cells.push(Cell::new(mark).set_alignment(CellAlignment::Center));
        }
        table.add_row(cells);
    }

    println!("{}", table);
    println!("Selected: {} key(s)", grid.selection_len());
}
