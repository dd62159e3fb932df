// Domain layer: hotel records and the ports the join pipeline is built on.

pub mod model;
pub mod ports;
