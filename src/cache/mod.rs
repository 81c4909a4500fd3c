//! Change-detection cache for stringsweep.
//!
//! This module records the content digest of every file the pipeline has
//! written, so a later pass over the same tree in the same process can skip
//! files that have not changed since.
//!
//! # Lifetime
//!
//! The cache lives in memory only. A [`HashCache`] is created empty for each
//! invocation and is dropped with the pipeline that owns it; nothing is
//! written to disk, so a fresh process always reprocesses every file.
//!
//! # Concurrency
//!
//! Each entry is only ever written by the worker that owns that path, so
//! writers never contend on a key. The map still sits behind a mutex so the
//! cache can be shared by reference across the worker pool.

pub mod memory;

pub use memory::HashCache;
