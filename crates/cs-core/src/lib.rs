pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod frame_loop;
pub mod geometry;
pub mod scheduler;
pub mod shell;
pub mod surface;

pub use app::Application;
pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use event::{
    InputEvent, InputEventKind, KeyAction, KeyEvent, Modifiers, MouseButton, PointerAction,
    PointerEvent, RawKeyInput, RawPointerInput, translate_key, translate_pointer,
};
pub use frame_loop::{FrameLoop, FrameTiming, LoopRequest};
pub use geometry::Point2D;
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use shell::Shell;
pub use surface::{StaticSurface, Surface, SurfaceRect};
