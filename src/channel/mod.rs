pub mod tracked_channels;

pub use tracked_channels::TrackedChannels;
