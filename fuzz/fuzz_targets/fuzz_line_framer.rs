//! Fuzz target: `LineFramer::feed` + `parse_line`
//!
//! Streams arbitrary bytes through the serial framer, parsing every line it
//! yields. Neither stage may panic, the framer must stay within capacity and
//! any accepted value must be finite and inside the value limit.
//!
//! cargo fuzz run fuzz_line_framer

#![no_main]

use libfuzzer_sys::fuzz_target;
use reddust_object::colour::map_value_to_colour;
use reddust_object::serial::framer::LineFramer;
use reddust_object::serial::parser::{VALUE_LIMIT, parse_line};

fuzz_target!(|data: &[u8]| {
    let mut framer = LineFramer::<128>::new();

    // Extract after every chunk so both the "many lines queued" and the
    // "line split across reads" shapes are exercised.
    for chunk in data.chunks(17) {
        for &b in chunk {
            framer.feed(b);
        }
        assert!(framer.len() <= framer.capacity());

        if let Some(line) = framer.extract_latest_complete() {
            assert!(!line.contains('\n'));
            if let Ok(sample) = parse_line(&line) {
                assert!(sample.value.is_finite());
                assert!(sample.value.abs() <= VALUE_LIMIT);
                let (_, g, _) = map_value_to_colour(sample.value);
                assert_eq!(g, 0);
            }
        }
    }
});
