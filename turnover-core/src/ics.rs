//! Reservation feed parsing.
//!
//! Booking platforms export reservations as a plain iCalendar feed with one
//! `VEVENT` per stay. Only `DTSTART`, `DTEND`, `SUMMARY` and `UID` carry
//! meaning here, so the feed is read with a small line scanner instead of a
//! full RFC 5545 parser: unknown properties, components and parameters are
//! skipped without complaint.

use chrono::NaiveDate;
use icalendar::parser::unfold;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date::parse_ical_date;

/// Summary used when a VEVENT carries no `SUMMARY`.
pub const DEFAULT_SUMMARY: &str = "Reservation";

/// One booked stay, as read from the feed.
///
/// `start` is the check-in date and `end` the check-out date. Both are
/// floating dates and serialize as `YYYY-MM-DD`. `start <= end` is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub summary: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub uid: String,
}

/// The required properties of a reservation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "DTSTART")]
    DtStart,
    #[serde(rename = "DTEND")]
    DtEnd,
    #[serde(rename = "UID")]
    Uid,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::DtStart => "DTSTART",
            Field::DtEnd => "DTEND",
            Field::Uid => "UID",
        };
        f.write_str(name)
    }
}

/// Why a VEVENT block did not become a [`Reservation`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("missing {field}")]
    MissingField { field: Field },

    #[error("invalid {field} value '{value}'")]
    InvalidDate { field: Field, value: String },

    #[error("no END:VEVENT before the next block or end of feed")]
    Unterminated,
}

/// A VEVENT block that was dropped from the reservation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedBlock {
    /// Zero-based position of the block among all VEVENT blocks in the feed.
    pub index: usize,
    pub uid: Option<String>,
    pub reason: RejectReason,
}

/// Result of reading a feed: the usable reservations, in feed order, plus
/// every block that was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFeed {
    pub reservations: Vec<Reservation>,
    pub rejected: Vec<RejectedBlock>,
}

/// Split feed text into logical lines, undoing RFC 5545 line folding.
///
/// Lines are separated by LF or CRLF. A line starting with a space or a tab
/// continues the previous logical line: that one whitespace character is
/// removed and the rest appended.
pub fn unfold_lines(text: &str) -> Vec<String> {
    unfold(text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Parse feed text into reservations, keeping a record of rejected blocks.
pub fn parse_feed(text: &str) -> ParsedFeed {
    let mut feed = ParsedFeed::default();
    let mut current: Option<PendingBlock> = None;
    let mut block_count = 0;

    for line in unfold_lines(text) {
        if line.starts_with("BEGIN:VEVENT") {
            if let Some(unfinished) = current.take() {
                feed.rejected.push(unfinished.unterminated());
            }
            current = Some(PendingBlock::new(block_count));
            block_count += 1;
        } else if line.starts_with("END:VEVENT") {
            let Some(block) = current.take() else {
                continue;
            };
            match block.finish() {
                Ok(reservation) => feed.reservations.push(reservation),
                Err(rejected) => {
                    tracing::debug!(index = rejected.index, reason = %rejected.reason, "dropping VEVENT");
                    feed.rejected.push(rejected);
                }
            }
        } else if let Some(block) = current.as_mut() {
            block.apply(&line);
        }
    }

    if let Some(unfinished) = current.take() {
        feed.rejected.push(unfinished.unterminated());
    }

    feed
}

/// Parse feed text into reservations, silently dropping incomplete blocks.
pub fn parse_reservations(text: &str) -> Vec<Reservation> {
    parse_feed(text).reservations
}

/// Properties collected for the VEVENT currently being read.
struct PendingBlock {
    index: usize,
    summary: Option<String>,
    start: Option<String>,
    end: Option<String>,
    uid: Option<String>,
}

impl PendingBlock {
    fn new(index: usize) -> Self {
        PendingBlock {
            index,
            summary: None,
            start: None,
            end: None,
            uid: None,
        }
    }

    fn apply(&mut self, line: &str) {
        if line.starts_with("DTSTART") {
            if let Some(value) = date_value(line) {
                self.start = Some(value.to_string());
            }
        } else if line.starts_with("DTEND") {
            if let Some(value) = date_value(line) {
                self.end = Some(value.to_string());
            }
        } else if line.starts_with("SUMMARY") {
            if let Some((_, value)) = line.split_once(':') {
                self.summary = Some(value.to_string());
            }
        } else if line.starts_with("UID") {
            if let Some((_, value)) = line.split_once(':') {
                self.uid = Some(value.to_string());
            }
        }
    }

    fn reject(&self, reason: RejectReason) -> RejectedBlock {
        RejectedBlock {
            index: self.index,
            uid: self.uid.clone().filter(|uid| !uid.is_empty()),
            reason,
        }
    }

    fn unterminated(self) -> RejectedBlock {
        self.reject(RejectReason::Unterminated)
    }

    fn finish(self) -> Result<Reservation, RejectedBlock> {
        let missing = |field| RejectReason::MissingField { field };

        let Some(start_raw) = self.start.as_deref() else {
            return Err(self.reject(missing(Field::DtStart)));
        };
        let Some(end_raw) = self.end.as_deref() else {
            return Err(self.reject(missing(Field::DtEnd)));
        };
        let uid = match self.uid.as_deref() {
            Some(uid) if !uid.is_empty() => uid.to_string(),
            _ => return Err(self.reject(missing(Field::Uid))),
        };

        let invalid = |field, value: &str| RejectReason::InvalidDate {
            field,
            value: value.to_string(),
        };
        let start = match parse_ical_date(start_raw) {
            Ok(date) => date,
            Err(_) => return Err(self.reject(invalid(Field::DtStart, start_raw))),
        };
        let end = match parse_ical_date(end_raw) {
            Ok(date) => date,
            Err(_) => return Err(self.reject(invalid(Field::DtEnd, end_raw))),
        };

        let summary = self
            .summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

        Ok(Reservation {
            summary,
            start,
            end,
            uid,
        })
    }
}

/// Value of a date property: the text between the first colon and the next
/// one (or the end of the line). Empty values count as absent.
fn date_value(line: &str) -> Option<&str> {
    let value = line.split(':').nth(1)?;
    (!value.is_empty()).then_some(value)
}
