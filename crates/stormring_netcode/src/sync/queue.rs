//! Single-writer packet queue bridging the network and render threads.
//!
//! The in-process scheduling model is cooperative and single-threaded, so
//! the decoder and the renderer never interleave by construction. When the
//! host splits networking and rendering onto real threads, this queue
//! reproduces the same guarantee without locks: the network thread
//! enqueues decoded packets, the render thread drains once per frame, and
//! channel FIFO order preserves arrival order.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::protocol::Packet;

/// Lock-free FIFO of decoded packets.
pub struct PacketQueue {
    sender: Sender<Packet>,
    receiver: Receiver<Packet>,
}

impl PacketQueue {
    /// Creates a bounded queue; sends beyond `capacity` are rejected
    /// rather than blocking the network thread.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates an unbounded queue.
    #[must_use]
    pub fn unbounded() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Enqueues a decoded packet without blocking.
    ///
    /// # Errors
    ///
    /// [`TrySendError::Full`] when a bounded queue is at capacity; the
    /// caller decides whether dropping state updates is acceptable.
    pub fn push(&self, packet: Packet) -> Result<(), TrySendError<Packet>> {
        self.sender.try_send(packet)
    }

    /// Drains every packet currently queued, in arrival order. Called
    /// once per frame by the render side.
    pub fn drain(&self) -> impl Iterator<Item = Packet> + '_ {
        self.receiver.try_iter()
    }

    /// A sender handle for the network thread.
    #[must_use]
    pub fn sender(&self) -> Sender<Packet> {
        self.sender.clone()
    }
}

impl Default for PacketQueue {
    fn default() -> Self {
        Self::new(1024)
    }
}
