pub mod app;
pub mod errors;
pub mod handlers;
pub mod injections;
pub mod models;
pub mod nutrition;
pub mod routine;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_dir};
