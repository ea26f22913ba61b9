//! Terminal UI: board, status, stats and the drop animation.

mod animation;
mod app;
mod game_view;

pub use animation::DropAnimation;
pub use app::App;
