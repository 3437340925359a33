//! From CSV text to [`GraphData`](crate::GraphData): validation, the
//! reference table, the join and sample generation.

pub mod process;
pub mod reference;
pub mod sample;
pub mod table;
pub mod validate;

pub use process::{GraphOptions, NodeKey, Role, Topology, process_submission};
pub use reference::{ReferenceRow, ReferenceTable};
pub use table::parse_table;
pub use validate::{SubmissionRow, check_mime, validate_csv};
