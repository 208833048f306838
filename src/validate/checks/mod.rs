//! Individual content checks

pub mod choices;
pub mod conditions;
pub mod flow;
pub mod references;
