pub mod cycle_config;
