pub mod swap_engine;
