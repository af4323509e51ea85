//! Side-store layout for session state.

/// Side-store keys.
///
/// Values are JSON documents written whole on every mutation.
pub mod keys {
    /// Key for the signed-in identity. Absent when nobody is signed in.
    pub const CURRENT_USER: &str = "user";

    /// Key for the full order collection.
    pub const ORDERS: &str = "orders";
}
