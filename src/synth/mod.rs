// Purpose: voice core, the fixed voice roster and the control surface
// This layer sits above the dsp primitives and below the engine

pub mod message;
pub mod set;
pub mod voice;

pub use message::{ControlMessage, ControlReceiver};
#[cfg(feature = "rtrb")]
pub use message::{control_channel, Controller};
pub use set::VoiceSet;
pub use voice::{Voice, VoiceCore, VoiceKind};
