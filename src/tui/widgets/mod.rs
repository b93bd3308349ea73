// TUI widgets

pub mod history;
pub mod progress;

pub use history::render_history;
pub use progress::render_progress;
