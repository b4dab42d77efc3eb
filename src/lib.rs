//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# patternlog

patternlog is a small logging library built around two pieces:

* a **format template**, compiled once from a pattern such as `"%T [%L] %S"`, that turns a
  level and a list of arguments into one line of text, and
* a **sink**, which receives each rendered line.  The most involved sink,
  [RotatingFileSink], writes into a directory of size-limited files and remembers which
  file is current across restarts.

# Templates

| Control          | Renders                                               |
|------------------|-------------------------------------------------------|
| `%T`             | `YYYY-MM-DDTHH:MM:SS`                                 |
| `%y` `%M` `%d`   | year, month, day (unpadded)                           |
| `%h` `%m` `%s`   | hour, minute, second (unpadded)                       |
| `%L`             | level name (`DEBUG`, `INFO`, `WARN`, `ERROR`, `FATAL`) |
| `%S`             | the next argument, or nothing once the arguments run out |

Every other character is copied as-is.  Any other character after `%`, including a
second `%`, is rejected when the template is compiled.  Surplus arguments are dropped and
every rendered record ends in exactly one `\n`.

# Example

```rust
use patternlog::{FormatTemplate, InMemorySink, Level, Logger};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let logger = Logger::new(
    Level::Info,
    FormatTemplate::compile("[%L] %S took %Sms").unwrap(),
    Box::new(sink.clone()),
);

patternlog::info!(logger, "startup", 12).unwrap();
logger.debug(&["filtered out"]).unwrap();
assert_eq!(sink.drain_logs(), "[INFO] startup took 12ms");
```

A logger can also be built from a YAML file; see [LoggerConfig].

# Sinks

* [ConsoleSink] writes to standard output (the browser console on wasm32).
* [RotatingFileSink] writes to size-rotated files.
* [TcpSink] and [UdpSink] write to a remote collector.
* [InMemorySink] collects records for tests.

Anything implementing [Sink] can be plugged into a [Logger].

# Levels

Levels are ordered `Debug < Info < Warn < Error < Fatal`.  A logger writes records at or
above its threshold.  `Fatal` is an ordinary level; logging it never exits the process.

# Diagnostics

patternlog reports its own internal events (rollovers, connections, configuration
fallbacks) through the [log](https://crates.io/crates/log) facade.  Install any `log`
implementation to see them.
*/

mod clock;
mod config;
mod console_sink;
mod error;
pub mod global_logger;
mod inmemory_sink;
mod level;
mod log_record;
mod logger;
mod macros;
mod network_sink;
mod rotating_file_sink;
mod sink;
mod template;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{init_logger, AppenderConfig, AppenderKind, LoggerConfig};
pub use console_sink::ConsoleSink;
pub use error::{ConfigError, SinkError};
pub use inmemory_sink::InMemorySink;
pub use level::Level;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use network_sink::{NetworkSink, TcpSink, Transport, UdpSink};
pub use rotating_file_sink::{
    parse_file_size, FileSinkOptions, RotatingFileSink, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_NAME_PREFIX, METADATA_FILE_NAME,
};
pub use sink::Sink;
pub use template::{FormatTemplate, Part, TimeField};
