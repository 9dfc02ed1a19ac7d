//! Raw tag keys whose values are normalised or audited.

/// Postal code key.
pub const POSTCODE: &str = "addr:postcode";
/// Street name key.
pub const STREET: &str = "addr:street";
/// Phone number keys.
pub const PHONE: [&str; 2] = ["phone", "contact:phone"];
