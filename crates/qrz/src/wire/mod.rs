//! HTTP wire layer for the QRZ XML interface.

mod client;

pub(crate) use client::XmlClient;
