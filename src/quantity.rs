#[macro_use]
mod macros;

pub mod energy;
pub mod percent;
pub mod power;
