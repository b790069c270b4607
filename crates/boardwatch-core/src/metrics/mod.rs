// ── Pure metric value handling ──
//
// Everything in this module is synchronous and side-effect free: string →
// number extraction, the fixed-length history window, and memory-size
// normalization. The async layers (poller, store) call in; nothing here
// calls out.

pub mod memory;
pub mod sample;
pub mod window;
