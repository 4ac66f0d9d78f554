pub mod calendar_pipeline;

pub use calendar_pipeline::CalendarPipeline;
