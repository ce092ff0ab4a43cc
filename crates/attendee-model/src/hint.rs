use crate::location::Location;
use crate::rdfa::Context;
use serde::{Deserialize, Serialize};

/// Relevant span found by one scan pass
///
/// `location` is relative to the document as it was when the pass ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub text: String,
    pub location: Location,
    pub resource: String,
    pub context: Context,
}
