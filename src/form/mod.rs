//! Everything that happens to the form before a request leaves the client.
//!
//! - field mapping into the wire payload (`mapper`)
//! - non-blocking advisories such as the implied loan term (`advisory`)
//! - hard field bounds that gate submission (`constraints`)
//! - amount parsing/formatting (`amount`)

pub mod advisory;
pub mod amount;
pub mod constraints;
pub mod mapper;

pub use advisory::{ValidationAdvisory, advisories, advisories_for_amounts, age_advisory, compute_loan_term};
pub use amount::{format_amount, parse_amount};
pub use constraints::{Field, FieldIssue, check_constraints};
pub use mapper::map_to_request;
