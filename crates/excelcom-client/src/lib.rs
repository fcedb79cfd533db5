//! Client side of the grid automation bridge.
//!
//! [`BridgeClient`] speaks the line-oriented JSON protocol over any buffered
//! reader and writer pair (a child process's pipes, a socket, or an in-memory
//! buffer). [`SheetBackend`] binds a client to one worksheet and implements
//! [`GridBackend`](excelcom_core::GridBackend), so the whole engine runs on top
//! of it.
//!
//! # Architecture
//!
//! ```text
//! Worksheet (excelcom-core)
//!     └── SheetBackend (this crate)
//!           └── BridgeClient: one JSON request line, one JSON response line
//!                 └── automation bridge (not part of this workspace)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::io::BufReader;
//! use std::net::TcpStream;
//!
//! use excelcom_client::BridgeClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stream = TcpStream::connect("127.0.0.1:7777")?;
//!     let mut client = BridgeClient::new(BufReader::new(stream.try_clone()?), stream);
//!
//!     let mut sheet = client.worksheet();
//!     sheet.set_content("A1:B2", vec![vec![1, 2], vec![3, 4]])?;
//!     let content = sheet.content("A1:B2")?;
//!     println!("{} rows", content.row_count());
//!     Ok(())
//! }
//! ```

mod client;
mod sheet;

pub use client::{BridgeClient, ClientConfig, ClientError};
pub use excelcom_protocol::SheetRef;
pub use sheet::SheetBackend;
