//! The deadline-ordered delivery queue backing sync-request timeouts and
//! delayed sends.

mod entry;
mod service;

pub use service::TimerService;
