pub mod route;
pub mod segment;
pub mod trade;

pub use route::Route;
pub use segment::{output_of_pools, partition_by_protocol, segment_route};
pub use trade::{Leg, Trade};
