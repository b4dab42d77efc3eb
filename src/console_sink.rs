// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkError;
use crate::sink::Sink;

/**
A sink that writes rendered records straight to stdout.

On wasm32 each record goes to the browser console instead.
 */
#[derive(Debug, Clone)]
pub struct ConsoleSink {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for ConsoleSink trait implementations:
//
// - Debug/Clone: Already derived - appropriate for zero-sized struct
// - Copy: Implemented - safe for zero-sized struct with no heap allocation
// - PartialEq/Eq: Implemented - all instances are equivalent (zero-sized)
// - Hash: Implemented - consistent with Eq
// - Default: Implemented - provides convenient zero-argument constructor
// - Display: NOT implemented - no meaningful string representation
// - Send/Sync: Automatically implemented - zero-sized struct is always thread-safe

impl Copy for ConsoleSink {}

impl PartialEq for ConsoleSink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ConsoleSink {}

impl std::hash::Hash for ConsoleSink {
    fn hash<H: std::hash::Hasher>(&self, _state: &mut H) {}
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Sink for ConsoleSink {
    fn write(&self, data: &[u8]) -> Result<(), SinkError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            // one lock per record keeps concurrent records from interleaving
            let mut lock = std::io::stdout().lock();
            lock.write_all(data)?;
            lock.flush()?;
        }
        #[cfg(target_arch = "wasm32")]
        {
            let msg = String::from_utf8_lossy(data);
            let msg = msg.strip_suffix('\n').unwrap_or(&msg);
            web_sys::console::log_1(&msg.into());
        }
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        //nothing to release; stdout outlives us
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_closes() {
        let sink = ConsoleSink::new();
        sink.write(b"console sink test\n").unwrap();
        sink.close().unwrap();
        // stdout stays usable after close
        sink.write(b"still here\n").unwrap();
    }
}
