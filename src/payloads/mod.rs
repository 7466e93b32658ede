/*!
 * Typed views of endpoint payloads.
 *
 * Most parsers are strict: a missing or malformed numeric field is a
 * protocol error. Comments, feedback, revisions and timestamped ids are
 * parsed leniently, like submitted jobs.
 */

pub mod account;
pub mod glossary;
pub mod job;
pub mod order;
pub mod service;

pub use account::{AccountStats, Balance, PreferredTranslator, PreferredTranslatorGroup};
pub use glossary::{Glossary, LanguageIdAndCode};
pub use job::{AuthorType, Comment, Feedback, JobGroup, Revision, TimestampedId};
pub use order::Order;
pub use service::{FileQuote, Language, LanguagePair, Quote};
