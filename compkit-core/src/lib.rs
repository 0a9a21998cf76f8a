//! compkit-core library exports

pub mod registry;
