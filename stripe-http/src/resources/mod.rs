//! Per-resource handles borrowed from a [`Client`](crate::Client).

mod files;
mod setup_intents;
mod subscription_schedules;

pub use files::Files;
pub use setup_intents::SetupIntents;
pub use subscription_schedules::SubscriptionSchedules;
