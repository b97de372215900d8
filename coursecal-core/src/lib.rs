//! Core logic for the coursecal feed server.
//!
//! This crate finds the freshest timetable export for a calendar name,
//! splits calendar documents into header/events/footer, and merges
//! several source calendars into one virtual calendar without duplicate
//! events. The browser-automation exporter that produces the files is a
//! separate program; this crate only ever reads.

pub mod error;
pub mod feed_config;
pub mod ics;
pub mod locator;

pub use error::{FeedError, FeedResult};
pub use feed_config::FeedConfig;
