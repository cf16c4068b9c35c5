//! Host boundary: card state, layout passes and exports.

/// The card session.
pub mod card_session;
