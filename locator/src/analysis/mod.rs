pub mod motif_search;
pub mod report;
