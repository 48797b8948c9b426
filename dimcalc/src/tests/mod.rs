use crate::{Dimension, DimensionRegistry};


// Measure, prefix and unit tests
mod measure;


/// Registry with mass, length and time registered in SI display order
pub(crate) fn mechanics() -> (DimensionRegistry, Dimension, Dimension, Dimension) {
    let mut registry = DimensionRegistry::new();
    let mass = registry.new_base("mass", "M", 0);
    let length = registry.new_base("length", "L", 1);
    let time = registry.new_base("time", "T", 2);
    (registry, mass, length, time)
}
