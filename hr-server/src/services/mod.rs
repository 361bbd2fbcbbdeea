//! Business operations that sit between handlers and stores

pub mod suggest;
