//! Target resolution and selection
//!
//! A firing first resolves its scope into the live candidate list
//! ([`resolve_targets`]) and then narrows that list with the config's
//! [`SelectionPolicy`](crate::SelectionPolicy) (`SelectionPolicy::apply`).
//! Both are closed sets dispatched with `match`.

pub mod resolve;
pub mod select;

pub use resolve::resolve_targets;
