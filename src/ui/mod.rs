// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates the dashboard layout and popup placement
// - render: Main orchestration function that coordinates all rendering
// - login: Login/register screen
// - header: Top bar (app name, user, load state)
// - breadcrumb: Numbered breadcrumb trail
// - folder_list / image_list: The two content panes
// - search: Image search input box
// - legend: Hotkey legend
// - status_bar: Bottom status bar
// - dialogs: Forms, confirmations and the error alert
// - preview: Image preview popup
// - toast: Toast notifications (brief pop-up messages)

pub mod breadcrumb;
pub mod dialogs;
pub mod folder_list;
pub mod header;
pub mod image_list;
pub mod layout;
pub mod legend;
pub mod login;
pub mod preview;
pub mod render;
pub mod search;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
