//! Crawl job tracking
//!
//! A crawl runs on the service; locally all we do is ask for its status on a
//! fixed interval until it reaches a terminal state.
//!
//! # Components
//!
//! - `JobStatus`: the status label reported by the service
//! - `Poller`: the polling state machine
//! - `PollHandle`: owns the task a poller runs on and tears it down on drop

mod handle;
mod poller;
mod status;

pub use handle::PollHandle;
pub use poller::{check_schedule, PollState, Poller};
pub use status::JobStatus;
