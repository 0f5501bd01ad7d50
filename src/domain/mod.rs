// Domain layer: the lead model and the ports to the outside services.

pub mod model;
pub mod ports;
