//! Context scanning and hint generation
//!
//! A context is relevant when its innermost statement types the span as an
//! attendee list. Each relevant context yields exactly one [`Hint`].

use attendee_model::{Context, Hint};

/// Check if `context` is an attendee list annotation
///
/// Only the last triple is considered. Contexts without triples are never
/// relevant.
#[inline]
#[must_use]
pub fn is_relevant(context: &Context, type_uri: &str) -> bool {
    context
        .last_triple()
        .is_some_and(|triple| triple.is_type(type_uri))
}

/// Build the hint for a relevant context
///
/// Returns `None` when the context has no triples.
#[must_use]
pub fn generate_hint(context: &Context) -> Option<Hint> {
    let triple = context.last_triple()?;
    Some(Hint {
        text: context.text.clone().unwrap_or_default(),
        location: context.region,
        resource: triple.subject.clone(),
        context: context.clone(),
    })
}

/// Hints for every relevant context, in input order
#[must_use]
pub fn generate_hints(contexts: &[Context], type_uri: &str) -> Vec<Hint> {
    contexts
        .iter()
        .filter(|context| is_relevant(context, type_uri))
        .filter_map(generate_hint)
        .collect()
}
