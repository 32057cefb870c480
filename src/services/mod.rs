pub mod aggregator;
pub mod history;
pub mod prober;
pub mod proxy;
pub mod scheduler;
