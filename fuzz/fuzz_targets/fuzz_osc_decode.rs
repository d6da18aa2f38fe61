//! Fuzz target: `osc::decode_value`
//!
//! Feeds arbitrary datagrams to the OSC decoder. It must reject garbage with
//! a typed error and never panic, including on deeply nested bundles.
//!
//! cargo fuzz run fuzz_osc_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use reddust_object::osc::{OSC_PACKET_CAPACITY, decode_value};

fuzz_target!(|data: &[u8]| {
    let datagram = &data[..data.len().min(OSC_PACKET_CAPACITY)];
    let _ = decode_value(datagram, "/red_dust/object_1");
});
