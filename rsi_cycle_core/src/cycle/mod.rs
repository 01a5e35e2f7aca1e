pub mod classifier;
pub mod cycle;
pub mod cycle_list;
pub mod cycle_stats;
