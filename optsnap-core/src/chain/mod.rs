/// Expiration timestamp helpers.
pub mod expiry;
/// Inner merge of call and put legs into combined snapshot rows.
pub mod merge;
/// Quote rounding and strike window construction.
pub mod window;
