//! Domain logic - pure values independent of git operations

pub mod branch;
pub mod commit;
pub mod rule;
pub mod tag;

pub use branch::BranchContext;
pub use commit::{Commit, HostCommit};
pub use rule::{CustomReleaseRule, ReleaseRule, ReleaseType};
pub use tag::{Tag, TagCommit, TagPrefix, SYNTHETIC_SHA};
