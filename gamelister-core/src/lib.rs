pub mod error;
pub mod lookup;
pub mod options;
pub mod record;

pub use error::OptionsError;
pub use lookup::{Domain, LookupTable, UNKNOWN_CODE, genres, platforms};
pub use options::{MatchMode, ReleaseStatus, SearchOptions, SortField};
pub use record::{CatalogRecord, Category};
