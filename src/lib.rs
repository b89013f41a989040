//! Atlas library exports: the country state store, derived views, the
//! remote source client, and the favorites persistence adapter.

pub mod cli;
pub mod core;
pub mod persist;
pub mod remote;

#[cfg(test)]
pub mod test_support;
