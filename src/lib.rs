//! Chainbeet chart timing and note graph.
//!
//! This crate turns a Chainbeet chart, which places notes on fractions of beats with embedded tempo and
//! speed directives, into a continuous-time model ready for drawing a vertically scrolling chart:
//!
//! - [`chart`] decodes the chart text and builds a [`chart::Timeline`], where every note has its absolute
//!   time and charge and chain notes are linked to their neighbors in the group.
//! - [`chart_process`] maps time onto the scroll axis with speed scales applied, and computes hints such
//!   as combo counts.
//! - [`analysis`] derives beat lines, coincident notes and beat subdivisions.
//! - `diagnostics` renders errors with their location in the chart text (feature `diagnostics`).
//!
//! Drawing, image output and file I/O are left to the caller.
//!
//! ```
//! use chainbeet::prelude::*;
//!
//! let source = r#"{
//!     "info": {"bpm": 120, "dir": "songs/x", "delay": 0},
//!     "notes": [
//!         [0, 4, 1, 0, 0, 20, 1],
//!         [0, 4, 2, 3, 1, 21, 1],
//!         [0, 4, 1, 2, 0, 10],
//!         [0, 4, 4, 1, 1, 3, 2.0]
//!     ]
//! }"#;
//! let timeline = parse_chart(source, ParseOptions::default())?;
//! let head = &timeline.notes()[0];
//! assert_eq!(timeline.next_of(head).map(Note::time), Some(1.0));
//!
//! let y = YCalculator::new(&timeline, ScrollConfig::default());
//! assert_eq!(y.get_y(1.0), YCoordinate(450.0));
//! assert_eq!(coincident_groups(&timeline).len(), 1);
//! # Ok::<(), ChartError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analysis;
pub mod chart;
pub mod chart_process;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod prelude;
