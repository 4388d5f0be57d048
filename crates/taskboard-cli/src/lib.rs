pub mod command;
pub mod controller;
pub mod output;
pub mod render;
pub mod session;

pub use command::LogicalCommand;
pub use controller::BoardController;
pub use render::{JsonLinesSink, RecordingSink, RenderEvent, RenderSink};
pub use session::run_session;
