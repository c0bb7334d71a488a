//! Meeting scheduling: conflict detection and the write path around it

pub mod conflict;
pub mod ports;
pub mod service;

pub use service::SchedulingService;
