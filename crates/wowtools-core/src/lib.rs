//! Core types: calendar feed parsing, calendar model, reference tables, URL templates

pub mod calendar;
pub mod ical;
pub mod reference;
pub mod tracing;
pub mod urls;

pub use calendar::{Attendee, CalendarEvent, CalendarMeta, ParseResult};
pub use ical::{IcalError, IcalResult, parse_calendar};
pub use reference::{CharacterClass, Race};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use urls::{UrlTemplate, encode_name, form_encode, title_case};
