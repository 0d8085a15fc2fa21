use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use probelens_core::panel::VisualizationPanel;

/// Print tokens with their raw scores and mapped colors.
pub fn print_token_table(panel: &VisualizationPanel, limit: Option<usize>) {
    let range = panel.clip_range();
    let tokens = panel.display_tokens();
    let scores = panel.scores().to_vec();
    let colors = panel.token_colors();

    println!(
        "\nInput attribution (clip {:.2} .. {:.2}):",
        range.min, range.max
    );

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Token").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Color"),
    ]);

    let shown = limit.unwrap_or(tokens.len()).min(tokens.len());
    for i in 0..shown {
        let score = scores.get(i).copied().unwrap_or(0.0);
        let color = colors
            .get(i)
            .map(|c| c.to_hex())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(i.to_string()).set_alignment(CellAlignment::Right),
            Cell::new(&tokens[i]),
            Cell::new(format!("{:.4}", score)).set_alignment(CellAlignment::Right),
            Cell::new(color).set_alignment(CellAlignment::Center),
        ]);
    }
    println!("{}", table);

    if shown < tokens.len() {
        println!("({} more tokens not shown)", tokens.len() - shown);
    }
}

/// Print the KDE summary and the chart path the dashboard would draw.
pub fn print_curve_summary(panel: &VisualizationPanel) {
    let curve = panel.density_curve();
    println!(
        "\nKDE: {} samples, peak density {:.4}",
        curve.points.len(),
        curve.max_density()
    );
    println!("Path: {}", panel.curve_svg_path());
}
