// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sinks that write records to a TCP stream or UDP socket.
//!
//! A network sink connects when it is constructed and writes each record as-is to the
//! connection.  There is no retry, backoff or automatic reconnection: a failed write is
//! returned to the caller, who may [`NetworkSink::reconnect`] or build a new sink.
//!
//! ```no_run
//! use patternlog::{Sink, TcpSink};
//!
//! let sink = TcpSink::connect("127.0.0.1:9000").unwrap();
//! sink.write(b"hello\n").unwrap();
//! sink.close().unwrap();
//! ```

use crate::error::{ConfigError, SinkError};
use crate::sink::Sink;
use std::fmt::Debug;
use std::io::{self, Write};
use std::net::{Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::sync::Mutex;

/// A connection a [NetworkSink] can write records to.
pub trait Transport: Debug + Send + Sized {
    /// Used in diagnostics, e.g. `"tcp"`.
    const PROTOCOL: &'static str;

    fn connect(addr: &str) -> io::Result<Self>;

    /// Sends one record.
    fn send(&mut self, data: &[u8]) -> io::Result<()>;

    fn disconnect(self) -> io::Result<()>;
}

impl Transport for TcpStream {
    const PROTOCOL: &'static str = "tcp";

    fn connect(addr: &str) -> io::Result<Self> {
        TcpStream::connect(addr)
    }

    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_all(data)
    }

    fn disconnect(self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // the peer may already have gone away
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

impl Transport for UdpSocket {
    const PROTOCOL: &'static str = "udp";

    fn connect(addr: &str) -> io::Result<Self> {
        let target = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
        })?;
        let local = match target {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(target)?;
        Ok(socket)
    }

    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        let sent = UdpSocket::send(self, data)?;
        if sent != data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sent {sent} of {} bytes", data.len()),
            ));
        }
        Ok(())
    }

    fn disconnect(self) -> io::Result<()> {
        Ok(())
    }
}

/**
A sink writing to a connection of type `T`.

Use the [TcpSink] and [UdpSink] aliases.
*/
#[derive(Debug)]
pub struct NetworkSink<T: Transport> {
    addr: String,
    connection: Mutex<Option<T>>,
}

/// Records written to a TCP stream.
pub type TcpSink = NetworkSink<TcpStream>;
/// One datagram per record.
pub type UdpSink = NetworkSink<UdpSocket>;

impl<T: Transport> NetworkSink<T> {
    /**
    Connects to `addr` (anything [ToSocketAddrs] accepts as a string, e.g.
    `"127.0.0.1:9000"` or `"logs.example:514"`).
    */
    pub fn connect(addr: impl Into<String>) -> Result<Self, ConfigError> {
        let addr = addr.into();
        let connection = T::connect(&addr).map_err(|source| ConfigError::Connect {
            addr: addr.clone(),
            source,
        })?;
        log::debug!("connected to {} server {}", T::PROTOCOL, addr);
        Ok(Self {
            addr,
            connection: Mutex::new(Some(connection)),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .map(|connection| connection.is_some())
            .unwrap_or(false)
    }

    /**
    Connects again after [Sink::close] or [NetworkSink::disconnect].

    Fails with [SinkError::AlreadyConnected] if the previous connection is still open,
    or with [SinkError::Io] if the server cannot be reached.
    */
    pub fn reconnect(&self) -> Result<(), SinkError> {
        let mut connection = self.connection.lock()?;
        if connection.is_some() {
            return Err(SinkError::AlreadyConnected);
        }
        *connection = Some(T::connect(&self.addr)?);
        log::debug!("reconnected to {} server {}", T::PROTOCOL, self.addr);
        Ok(())
    }

    /**
    Drops the connection.

    Fails with [SinkError::NotConnected] if there is no connection.
    */
    pub fn disconnect(&self) -> Result<(), SinkError> {
        let connection = self
            .connection
            .lock()?
            .take()
            .ok_or(SinkError::NotConnected)?;
        connection.disconnect()?;
        log::debug!("disconnected from {} server {}", T::PROTOCOL, self.addr);
        Ok(())
    }
}

impl<T: Transport> Sink for NetworkSink<T> {
    fn write(&self, data: &[u8]) -> Result<(), SinkError> {
        let mut connection = self.connection.lock()?;
        let connection = connection.as_mut().ok_or(SinkError::NotConnected)?;
        connection.send(data)?;
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        self.disconnect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn tcp_writes_reach_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut received = String::new();
            stream.read_to_string(&mut received).unwrap();
            received
        });

        let sink = TcpSink::connect(addr.to_string()).unwrap();
        assert!(sink.is_connected());
        sink.write(b"first\n").unwrap();
        sink.write(b"second\n").unwrap();
        sink.close().unwrap();

        assert_eq!(server.join().unwrap(), "first\nsecond\n");
    }

    #[test]
    fn tcp_lifecycle_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let sink = TcpSink::connect(addr.to_string()).unwrap();
        assert!(matches!(sink.reconnect(), Err(SinkError::AlreadyConnected)));
        sink.close().unwrap();
        assert!(!sink.is_connected());
        assert!(matches!(sink.write(b"x"), Err(SinkError::NotConnected)));
        assert!(matches!(sink.close(), Err(SinkError::NotConnected)));

        sink.reconnect().unwrap();
        assert!(sink.is_connected());
    }

    #[test]
    fn tcp_connect_failure_is_config_error() {
        // grab a free port, then release it so nothing is listening
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = TcpSink::connect(format!("127.0.0.1:{port}")).unwrap_err();
        assert!(matches!(err, ConfigError::Connect { .. }), "{err:?}");
    }

    #[test]
    fn failed_reconnect_is_io_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let sink = TcpSink::connect(addr.to_string()).unwrap();
        sink.close().unwrap();
        drop(listener);

        let err = sink.reconnect().unwrap_err();
        assert!(matches!(err, SinkError::Io(_)), "{err:?}");
        assert!(!err.is_fatal());
        assert!(!sink.is_connected());
    }

    #[test]
    fn udp_sends_one_datagram_per_record() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        server
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let addr = server.local_addr().unwrap();

        let sink = UdpSink::connect(addr.to_string()).unwrap();
        sink.write(b"datagram\n").unwrap();

        let mut buf = [0u8; 64];
        let len = server.recv(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"datagram\n");

        sink.close().unwrap();
        assert!(matches!(sink.close(), Err(SinkError::NotConnected)));
    }
}
