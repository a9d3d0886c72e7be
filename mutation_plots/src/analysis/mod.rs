pub mod export;
pub mod mutation_bar_chart;
pub mod render;
