pub mod experiment;
pub mod ids;
pub mod metrics;
pub mod response;

pub use experiment::*;
pub use ids::*;
pub use metrics::*;
pub use response::*;
