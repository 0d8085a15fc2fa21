mod grid;
mod tables;

pub use self::grid::print_grid;
pub use self::tables::{print_curve_summary, print_token_table};
