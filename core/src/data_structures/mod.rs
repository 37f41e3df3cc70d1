pub mod graph;
pub mod union_find;
