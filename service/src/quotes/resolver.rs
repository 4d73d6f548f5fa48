//! Character quote resolution: name lookup, quote fetch, random pick.

use std::sync::Arc;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::the_one_api::{Character, Quote, TheOneApiClient, TheOneApiError};

/// A single quote as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "character": "Gandalf",
    "quote": "A wizard is never late, nor is he early, he arrives precisely when he means to.",
    "movie": "5cd95395de30eff6ebccde5b"
}))]
pub struct ResolvedQuote {
    /// Canonical character name
    pub character: String,
    /// Quote text
    pub quote: String,
    /// Movie the quote comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
}

/// Outcome of a resolution that did not fail upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedQuote),
    /// No character matched the name.
    CharacterNotFound,
    /// A character matched but has no dialog-bearing quotes.
    NoQuotes { character: String },
}

/// Result of the upstream lookups, before the random draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    CharacterNotFound,
    NoQuotes(Character),
    /// `quotes` is never empty.
    Available {
        character: Character,
        quotes: Vec<Quote>,
    },
}

impl Candidates {
    /// Draw one quote uniformly at random.
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> Resolution {
        match self {
            Self::CharacterNotFound => Resolution::CharacterNotFound,
            Self::NoQuotes(character) => Resolution::NoQuotes {
                character: character.name,
            },
            Self::Available { character, quotes } => match quotes.choose(rng) {
                Some(quote) => Resolution::Found(ResolvedQuote {
                    character: character.name,
                    quote: quote.dialog.clone().unwrap_or_default(),
                    movie: (!quote.movie.is_empty()).then(|| quote.movie.clone()),
                }),
                None => Resolution::NoQuotes {
                    character: character.name,
                },
            },
        }
    }
}

/// Turns a character name into a random quote.
///
/// Holds nothing but a shared client handle, so one instance serves all
/// requests concurrently.
#[derive(Clone)]
pub struct QuoteResolver {
    client: Arc<dyn TheOneApiClient>,
}

impl QuoteResolver {
    #[must_use]
    pub fn new(client: Arc<dyn TheOneApiClient>) -> Self {
        Self { client }
    }

    /// Resolve `name` to a random quote using the thread-local RNG.
    ///
    /// `name` must already be trimmed and non-empty.
    ///
    /// # Errors
    /// Propagates any `TheOneApiError` from either upstream call unchanged.
    pub async fn resolve(&self, name: &str) -> Result<Resolution, TheOneApiError> {
        let candidates = self.candidates(name).await?;
        Ok(candidates.pick(&mut rand::thread_rng()))
    }

    /// Same as [`resolve`](Self::resolve) with a caller-supplied RNG.
    ///
    /// # Errors
    /// Propagates any `TheOneApiError` from either upstream call unchanged.
    pub async fn resolve_with_rng<R: Rng + Send>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<Resolution, TheOneApiError> {
        let candidates = self.candidates(name).await?;
        Ok(candidates.pick(rng))
    }

    /// Run the character search and, if it matched, the quote fetch.
    ///
    /// # Errors
    /// Propagates any `TheOneApiError` from either upstream call unchanged.
    pub async fn candidates(&self, name: &str) -> Result<Candidates, TheOneApiError> {
        let Some(character) = self.client.search_character(name).await? else {
            tracing::debug!(name, "no character matched");
            return Ok(Candidates::CharacterNotFound);
        };

        let mut quotes = self.client.list_quotes(&character.id).await?;
        quotes.retain(Quote::has_dialog);

        if quotes.is_empty() {
            tracing::debug!(character = %character.name, "character has no dialog quotes");
            return Ok(Candidates::NoQuotes(character));
        }

        Ok(Candidates::Available { character, quotes })
    }
}
