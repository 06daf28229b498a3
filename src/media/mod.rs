//! External multimedia tooling.
//!
//! The codec never touches containers itself. This module shells out to
//! `ffmpeg` to split a video file into its raw video and audio streams and to
//! mux restored streams back into a container:
//!
//! - [`ToolCommand`] -- synchronous builder for running an external process
//!   and checking its exit status.
//! - [`locate_ffmpeg`] -- resolve the `ffmpeg` executable from an override or `PATH`.
//! - [`extract_streams`] / [`combine_streams`] -- stream copy demux and mux.

pub mod command;
pub mod streams;

pub use command::{ToolCommand, ToolOutput};
pub use streams::{combine_streams, extract_streams, locate_ffmpeg};
