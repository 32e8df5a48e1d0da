#[macro_use]
extern crate tracing;

pub mod cli;
pub mod compositor;
pub mod input;
pub mod layout;
pub mod session;
pub mod stacking;
pub mod utils;
pub mod view;

#[cfg(test)]
mod tests;
