//! JSON configuration of the command-line tools.

pub mod consistency;
pub mod lane_detect;
