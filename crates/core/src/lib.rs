//! Core library for steamcard.
//!
//! Turns `<steam-game appId="…">` tags and `::steamgame{appId="…"}` directives in a
//! document tree into Steam store cards, either by calling the store API while the
//! document is built or by emitting a loading card that the client module fills in
//! the browser.

pub mod card;
pub mod client;
pub mod config;
pub mod document;
pub mod lookup;
pub mod markdown;

pub use card::{CardError, ResolveReport, Resolver};
pub use document::{Element, Node, TreeEditor};
pub use lookup::{GameLookup, LookupError, SteamClient};
