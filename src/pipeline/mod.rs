//! # Append Pipeline
//!
//! Sequences the normalize and concat stages and owns the temporary files
//! between them.

pub mod appender;
pub mod batch;

pub use appender::{AppendReport, VideoAppender};
pub use batch::{batch_output_path, BatchFailure, BatchReport};
