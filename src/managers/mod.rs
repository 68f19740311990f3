// tilmarks state managers
// Managers own mutable state: the user collection, the draft slot, the status board.

pub mod bookmark_manager;
pub mod draft_manager;
pub mod status_manager;
