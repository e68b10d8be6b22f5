mod auth_user;
mod hero;
mod hero_class;
mod hero_id;
mod hero_state;
mod user_id;

pub use auth_user::AuthUser;
pub use hero::{Feature, FeatureKind, Hero, HeroSummary, UNKNOWN_CLASS};
pub use hero_class::{max_stamina, ClassStats, HeroClass};
pub use hero_id::HeroId;
pub use hero_state::{HeroState, HeroStateField};
pub use user_id::UserId;
