#![deny(missing_docs)]
#![doc = "Core types shared by the chk assertion crates: errors, call-site locations, truthiness and strict values."]

pub mod errors;
/// Content hashes of reports.
pub mod hash;
pub mod location;
pub mod serde;
pub mod truthy;
pub mod value;

pub use errors::{ChkError, ErrorInfo};
pub use hash::{content_hash, verify_content_hash};
pub use location::CallerLocation;
pub use truthy::Truthy;
pub use value::{strict_equals, StrictValue};
