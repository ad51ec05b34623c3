pub mod benchmark;
pub mod dot;
pub mod loader;
pub mod run;
