//! NMEA Kinematics Library
//!
//! A Rust library for turning NMEA-0183 `$GPRMC` logs into a time-ordered
//! sequence of motion records with per-step kinematics and summary statistics.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export of records and statistics
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable statistics export in JSON format
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! ```rust
//! use nmea_kinematics::{analyze_sources, AnalysisOptions};
//!
//! let log = "$GPRMC,120000,A,4807.038,N,01131.000,E,5.0,0.0,010125\n\
//!            $GPRMC,120010,A,4807.138,N,01131.000,E,9.0,0.0,010125\n";
//! let analysis = analyze_sources(&[log], &AnalysisOptions::default());
//! assert_eq!(analysis.records.len(), 2);
//! println!("Total distance: {:?} km", analysis.report.total_distance_km);
//! ```
//!
//! # Pipeline
//!
//! raw lines → [`parse_sentence`] → [`assemble_fixes`] → [`derive_records`]
//! → [`compute_statistics`]. [`analyze_sources`] runs the whole chain.
//!
//! Malformed RMC sentences never abort a run: they come back as
//! [`LineWarning`]s next to the records, and lines that are not RMC sentences
//! are dropped silently.

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod kinematics;
pub mod parser;
pub mod statistics;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use kinematics::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use statistics::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
