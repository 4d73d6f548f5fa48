//! Random character quotes.
//!
//! [`resolver::QuoteResolver`] runs the lookup workflow against a
//! [`TheOneApiClient`](crate::the_one_api::TheOneApiClient); [`http`] exposes
//! it as `GET /quotes/{character_name}`.

pub mod http;
pub mod resolver;

pub use http::{QuoteApiError, QuotesState};
pub use resolver::{Candidates, QuoteResolver, Resolution, ResolvedQuote};
