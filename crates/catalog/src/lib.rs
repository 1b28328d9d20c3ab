//! Static reference data for the UrbanRoot client.
//!
//! Every table here is constant and read-only. The Shell renders them; nothing
//! in this crate holds state.

pub mod crops;
pub mod error;
pub mod experts;
pub mod greeting;
pub mod market;
pub mod plans;

pub use crops::{crops, crops_for_season, Crop, Difficulty, Season};
pub use error::{CatalogError, CatalogResult};
pub use experts::{book, expert, experts, Booking, ConsultationType, Expert, TIME_SLOTS};
pub use greeting::{greeting, greeting_for_hour, Clock, FixedClock, SystemClock};
pub use market::{
    list_harvest, market_price, market_prices, suggested_price, Listing, MarketPrice, Quality,
    LISTING_CREATED,
};
pub use plans::{plan, plans, space, spaces, subscribe, BillingPeriod, GardenSpace, Plan, Subscription};
