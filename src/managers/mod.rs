// Managers Module
//
// Focused lifecycle managers operated by AppContext.
//
// PlayerSessionManager owns the single live player session and is the one
// place session replacement and release happen.

pub mod session_manager;

pub use session_manager::PlayerSessionManager;
