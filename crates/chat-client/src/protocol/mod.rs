//! Wire protocol
//!
//! Text frames carrying one flat JSON object each; no compression, no multiplexing.

mod frame;

pub use frame::{decode_frame, encode_event, Frame};
