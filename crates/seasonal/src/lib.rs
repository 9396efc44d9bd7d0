//! Seasonal relevance for plant diseases.
//!
//! A [`SeasonalTable`] maps a disease to the months in which it peaks and the
//! months in which it is moderately common. Scoring a month returns one of
//! three fixed levels:
//!
//! | Month is…            | Relevance |
//! |----------------------|-----------|
//! | a peak month         | `1.0`     |
//! | a moderate month     | `0.7`     |
//! | anything else        | `0.3`     |
//!
//! Diseases with no pattern on record also score `0.3`.
//!
//! The current month always comes from an injected [`Clock`]. Use
//! [`SystemClock`] in production and [`FixedClock`] in tests or replays.
//!
//! ```rust
//! use seasonal::{Clock, FixedClock, SeasonalTable};
//!
//! let clock = FixedClock::for_month(2024, 8).unwrap();
//! let score = SeasonalTable::builtin().relevance("Late Blight", clock.month());
//! assert_eq!(score, 1.0);
//! ```

mod clock;
mod error;
mod table;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::error::SeasonalError;
pub use crate::table::{
    SeasonalPattern, SeasonalTable, MODERATE_RELEVANCE, OFF_SEASON_RELEVANCE, PEAK_RELEVANCE,
    UNKNOWN_DISEASE_RELEVANCE,
};
