//! Game card resolution.
//!
//! A pass runs in two steps. [`scanner::scan`] collects markers without
//! touching the tree, then [`Resolver`] validates each one, runs lookups with
//! a bounded number in flight, and replaces every marker in place with a
//! card or an error fragment. One marker failing never affects another.

pub mod cancel;
pub mod fragment;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod validate;

pub use cancel::{CancelHandle, CancelSignal, cancel_pair};
pub use resolver::Resolver;
pub use scanner::{MarkerMatch, scan};
pub use types::{AppId, CardError, GameCard, MarkerKind, MarkerNames, ResolveReport};
