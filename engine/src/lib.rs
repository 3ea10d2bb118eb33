use crate::{client::ImageGenerator, throttle::Throttle};

pub mod batch;
pub mod client;
pub mod error;
pub mod request;
pub mod throttle;

pub use batch::{BatchConfig, BatchRunner, Summary, WorkItem};
pub use client::{GenerationClient, Outcome};
pub use request::AspectRatio;

pub type GeneratorBox = Box<dyn ImageGenerator + Send + Sync>;
pub type ThrottleBox = Box<dyn Throttle + Send>;
