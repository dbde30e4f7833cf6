mod transform;

pub use transform::{spin_system, transform_propagation_system};
