//! Marker types.

/// Marker type describing a birth.
#[derive(Clone, Copy, Debug)]
pub struct Birth;

/// Marker type describing an entity finishing.
#[derive(Clone, Copy, Debug)]
pub struct Finish;

/// Marker type describing an entity import.
#[derive(Clone, Copy, Debug)]
pub struct Import;

/// Marker type describing a contract signing.
#[derive(Clone, Copy, Debug)]
pub struct Signing;

/// Marker type describing an entity update.
#[derive(Clone, Copy, Debug)]
pub struct Update;
