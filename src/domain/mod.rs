// Domain layer: records, raw feed payloads and the data source port.

pub mod feed;
pub mod model;
pub mod ports;
