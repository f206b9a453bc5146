//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a handover.
#[derive(Clone, Copy, Debug)]
pub struct Handover;

/// Marker type describing a payment due.
#[derive(Clone, Copy, Debug)]
pub struct Due;

/// Marker type describing an audit.
#[derive(Clone, Copy, Debug)]
pub struct Audit;

/// Marker type describing a ledger entry.
#[derive(Clone, Copy, Debug)]
pub struct Entry;

/// Marker type describing a period start.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing a period end.
#[derive(Clone, Copy, Debug)]
pub struct End;
