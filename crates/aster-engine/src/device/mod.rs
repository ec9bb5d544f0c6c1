//! GPU device acquisition.

mod headless;

pub use headless::{GpuInit, HeadlessGpu};
