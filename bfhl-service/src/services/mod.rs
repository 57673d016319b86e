pub mod dispatcher;
pub mod metrics;
pub mod operations;
pub mod providers;

pub use dispatcher::Dispatcher;
pub use metrics::init_metrics;
