//! Core types for calplus.
//!
//! This crate holds everything the server and the CLI share:
//! - `Event` and the priority table (`Level`)
//! - `visibility`, the resolver that decides which events occur on a day
//! - `EventStore`, `EventStorage` and the `Planner` controller that owns the collection
//! - `DateBus` for "date selected" notifications between views

pub mod bus;
pub mod config;
pub mod date;
pub mod draft;
pub mod error;
pub mod event;
pub mod month;
pub mod planner;
pub mod priority;
pub mod storage;
pub mod store;
pub mod visibility;

pub use date::CalendarDate;
pub use error::{PlannerError, PlannerResult};
pub use event::{Event, EventId, Record, Repeat};
pub use priority::Level;
