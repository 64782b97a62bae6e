mod error;
mod gate;
mod permit;
mod shared;
mod stats;

pub use error::LimiterError;
pub use gate::RateLimiter;
pub use permit::Permit;
pub use shared::shared;
pub use stats::LimiterStats;

#[cfg(test)]
mod tests;
