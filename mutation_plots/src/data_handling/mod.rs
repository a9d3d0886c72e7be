pub mod flags;
pub mod mutation_table;
