//! Shared test doubles for the Ventra sales platform.

mod clock;
mod inventory;

pub use clock::FixedClock;
pub use inventory::{RecordingInventory, RemoteCall};
