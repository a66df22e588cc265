//! # Synchronized Entities
//!
//! Client-side representation of server-authoritative objects.
//!
//! ## Full vs. Partial Updates
//!
//! A full update arrives once, at creation, and establishes identity and
//! semi-static fields (type, stack count, spawn flag). Partial updates
//! arrive every tick thereafter and refresh only volatile fields
//! (position). Splitting the two keeps per-tick wire bytes minimal:
//! count and spawn flag never need retransmitting once known.
//!
//! ## Writers and Readers
//!
//! Message handlers applying decoded updates are the only writers of
//! authoritative fields here; the per-frame render callback only reads
//! them and advances presentation state (spawn animation progress). Under
//! real threads, [`PacketQueue`] carries decoded packets from the network
//! thread to the render thread in arrival order.

mod loot;
mod queue;
mod store;

pub use loot::{Loadout, Loot, SpawnAnimation};
pub use queue::PacketQueue;
pub use store::EntityStore;
