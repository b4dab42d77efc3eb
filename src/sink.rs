// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkError;
use std::fmt::Debug;

/**
A destination for rendered log records.

Sinks receive fully rendered bytes (one record per call, newline included) and own
whatever resource they write to.  Implementations synchronize internally, so a sink
can be shared between threads behind an `Arc` or inside a [crate::Logger].
*/
pub trait Sink: Debug + Send + Sync {
    /**
    Writes one rendered record.

    A record is written whole or not at all from the sink's point of view; sinks do not
    split a record across destinations.
    */
    fn write(&self, data: &[u8]) -> Result<(), SinkError>;

    /**
    Releases the underlying resource.  Writes after a successful close fail.
    */
    fn close(&self) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn write(&self, data: &[u8]) -> Result<(), SinkError> {
        (**self).write(data)
    }

    fn close(&self) -> Result<(), SinkError> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&self, data: &[u8]) -> Result<(), SinkError> {
        (**self).write(data)
    }

    fn close(&self) -> Result<(), SinkError> {
        (**self).close()
    }
}

/*
Boilerplate notes.

# Sink

Clone makes no sense: a sink owns a file or a socket.
PartialEq/Hash would have to mean provenance rather than data; not implemented.
Default is not sensible since most sinks need a path or an address.
Send/Sync are required so that a Logger can be shared; every sink in this crate
keeps its mutable state behind a Mutex.
*/
