//! Calendar feed (.ics) parsing and generation.
//!
//! Feeds are read with the icalendar crate's parser after the text has been
//! unfolded and normalized here, so files with mixed line endings still parse.

mod generate;
mod parse;

pub use generate::generate_feed;
pub use parse::{parse_feed, parse_feed_bytes};
