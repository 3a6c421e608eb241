//! Domain types for interval meter data that has already been parsed out of
//! a NEM12/NEM13 file.

pub mod domain;
