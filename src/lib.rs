//! # Simple client for the Postmark DMARC API.
//!
//! Implements an easy-to-use client for interfacing with the [Postmark DMARC
//! API]. Every operation maps onto a single endpoint of the hosted service;
//! requests are described by a [`request::RequestSpec`] and dispatched
//! through a pluggable [`transport::Transport`].
//!
//! ## Examples
//!
//! ```no_run
//! use postmark_dmarc::Client;
//!
//! let client = Client::builder()
//!     .account_token("<ACCOUNT_TOKEN>")
//!     .build()
//!     .unwrap();
//!
//! let record = client.get_record().unwrap();
//! println!("{}", record.text());
//!
//! client.verify_dns().unwrap();
//! ```
//!
//! [Postmark DMARC API]: https://dmarc.postmarkapp.com/api/

mod client;
mod errors;
pub mod request;
pub mod transport;

pub use client::*;
pub use errors::*;
