//! Ambient plumbing shared by every scanner crate.

pub mod logger;
