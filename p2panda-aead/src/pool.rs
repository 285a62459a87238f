// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reusable scratch buffers for MAC inputs.
//!
//! A MAC input holds a copy of the additional data and the ciphertext of one operation. Buffers
//! are zeroised before they go back into the pool so the next borrower never observes another
//! call's data. The lock is only held while a buffer is taken out or put back.
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, LazyLock, Mutex};

use tracing::trace;
use zeroize::Zeroize;

/// Number of idle buffers kept by the shared pool.
pub const DEFAULT_MAX_POOLED: usize = 16;

static SHARED_POOL: LazyLock<Arc<MacInputPool>> =
    LazyLock::new(|| Arc::new(MacInputPool::new(DEFAULT_MAX_POOLED)));

/// Returns the process-wide pool used by ciphers which were not given their own.
pub(crate) fn shared_pool() -> Arc<MacInputPool> {
    SHARED_POOL.clone()
}

/// Thread-safe free-list of zeroised byte buffers.
#[derive(Debug)]
pub struct MacInputPool {
    free: Mutex<Vec<Vec<u8>>>,
    max_pooled: usize,
}

impl MacInputPool {
    /// Creates an empty pool which keeps at most `max_pooled` idle buffers.
    pub fn new(max_pooled: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_pooled,
        }
    }

    /// Takes a zeroed buffer of exactly `len` bytes out of the pool.
    ///
    /// An idle buffer with enough capacity is reused, otherwise a new one is allocated.
    pub fn checkout(&self, len: usize) -> PooledBuffer<'_> {
        let reused = self.free.lock().ok().and_then(|mut free| {
            let index = free.iter().position(|buffer| buffer.capacity() >= len)?;
            Some(free.swap_remove(index))
        });

        let buffer = match reused {
            Some(mut buffer) => {
                trace!(len, capacity = buffer.capacity(), "reuse pooled mac input buffer");
                // Idle buffers are zero up to their capacity.
                if buffer.len() >= len {
                    buffer.truncate(len);
                } else {
                    buffer.resize(len, 0);
                }
                buffer
            }
            None => {
                trace!(len, "allocate mac input buffer");
                vec![0; len]
            }
        };

        PooledBuffer {
            buffer: Some(buffer),
            pool: self,
        }
    }

    fn checkin(&self, mut buffer: Vec<u8>) {
        buffer.as_mut_slice().zeroize();

        match self.free.lock() {
            Ok(mut free) if free.len() < self.max_pooled => free.push(buffer),
            _ => trace!(
                capacity = buffer.capacity(),
                "discard mac input buffer, pool is full"
            ),
        }
    }

    /// Number of idle buffers currently held.
    pub fn idle(&self) -> usize {
        self.free.lock().map(|free| free.len()).unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn idle_buffers_are_zeroed(&self) -> bool {
        self.free
            .lock()
            .map(|free| free.iter().all(|buffer| buffer.iter().all(|byte| *byte == 0)))
            .unwrap_or_default()
    }
}

impl Default for MacInputPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POOLED)
    }
}

/// Buffer checked out of a [`MacInputPool`], returned zeroised on drop.
pub struct PooledBuffer<'a> {
    buffer: Option<Vec<u8>>,
    pool: &'a MacInputPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.buffer.as_deref().unwrap_or_default()
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.buffer.as_deref_mut().unwrap_or_default()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.checkin(buffer);
        }
    }
}
