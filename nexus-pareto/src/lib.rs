//! Incremental non-dominated archive for 3- and 4-objective minimisation,
//! with hypervolume.
//!
//! The archive keeps a set of mutually non-dominated points and answers
//! dominance queries and hypervolume questions about it. Points live in an
//! arena; a sorted circular list links them, and sweeps over that list do
//! the pruning, neighbour bookkeeping and volume computation.
//!
//! # Design
//!
//! ```text
//! points ──► BatchLoader ──► DominancePruner ──► NeighborIndex ──► HypervolumeEngine
//!            (sort + link)    (drop dominated)    (closest[])       (volume, cached)
//! ```
//!
//! - **Stable keys**: nodes sit in a [`slab`] and are addressed by
//!   [`NodeKey`]; unlinking never invalidates other keys.
//! - **Sentinels**: three fixed nodes bound every list, so the sweeps never
//!   special-case the ends and the reference point is just sentinel data.
//! - **Sweep order**: points are sorted by `(x[d-1], ..., x[0])`. A point's
//!   dominators always sort at or before it, which bounds every scan.
//!
//! # Quick Start
//!
//! ```
//! use nexus_pareto::Archive;
//!
//! let points = [[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
//! let mut archive: Archive = Archive::from_points(&points, Some(&[3.0, 3.0, 3.0])).unwrap();
//!
//! // [2, 2, 2] is dominated and dropped
//! assert_eq!(archive.points(), vec![vec![1.0, 1.0, 1.0]]);
//! assert_eq!(archive.hypervolume().unwrap(), 8.0);
//!
//! assert!(archive.insert(&[0.0, 2.0, 2.0], None).unwrap());
//! assert_eq!(archive.hypervolume().unwrap(), 9.0);
//! ```
//!
//! # Logging
//!
//! Construction summaries and sweep statistics go to [`tracing`] at `debug`,
//! individual insert decisions at `trace`. The crate installs no subscriber.

#![warn(missing_docs)]

pub mod archive;
pub mod engine;
pub mod error;
pub mod key;
pub mod list;
pub mod loader;
pub mod neighbor;
pub mod node;
pub mod point;
pub mod prune;
pub mod skiplist;

pub use archive::{Archive, ArchiveBuilder};
pub use engine::{HypervolumeEngine, SweepEngine};
pub use error::{ArchiveError, Result};
pub use key::{Key, NodeKey};
pub use list::DominanceList;
pub use loader::BatchLoader;
pub use neighbor::{NeighborIndex, NeighborPass};
pub use node::Node;
pub use point::{Ordinate, SweepOrder, strictly_dominates, weakly_dominates};
pub use prune::{DominancePruner, Insertion};
pub use skiplist::SkipList;
