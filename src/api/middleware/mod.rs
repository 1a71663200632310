pub mod internal_error;
pub mod listing;
pub mod recovery;

pub use internal_error::mask_internal_errors;
pub use listing::{get_listing, listing_middleware, Listing};
pub use recovery::recover_panic;
