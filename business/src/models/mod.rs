//! Records as the API sends them.
//!
//! Identifiers and money amounts arrive as strings or numbers; both are accepted and kept
//! as strings. Unmodelled fields live in each record's `extra` map.

mod de;
mod lead;
mod listing;
mod media;
mod place;
mod property_link;
mod status;
mod subscription;

pub use lead::Lead;
pub use listing::{Listing, ListingQuery};
pub use media::{Media, MediaQuery};
pub use place::Place;
pub use property_link::PropertyLink;
pub use status::{PaymentStatus, PlaceStatus, ReviewStatus, UserType};
pub use subscription::{Subscription, SubscriptionQuery};
