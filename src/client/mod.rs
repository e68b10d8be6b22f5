//! Client side of the hero resource sync: a session-scoped cache that writes
//! optimistically and syncs through [`HeroApi`].

mod hero_api;
mod hero_store;
mod session;

pub use hero_api::{HeroApi, HttpHeroApi, RequestFailed};
pub use hero_store::{HeroStore, HeroStoreState, SyncFailurePolicy, SyncHandle};
pub use session::PlayerSession;
