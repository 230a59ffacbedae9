#![no_main]
use libfuzzer_sys::fuzz_target;

use ctjson::{parse, reconstruct, tokenize};

fuzz_target!(|data: &[u8]| {
    // We only care about inputs that are valid UTF-8.
    if let Ok(s) = std::str::from_utf8(data) {
        // Any panic in either stage is a bug.
        if let Ok(tokens) = tokenize(s) {
            let again = tokenize(&reconstruct(&tokens)).expect("reconstruction must tokenize");
            assert!(tokens.kinds().eq(again.kinds()));
        }

        if let Ok(node) = parse(s) {
            let reparsed = parse(&node.to_json_string()).expect("serialized tree must parse");
            assert_eq!(node, reparsed);
        }
    }
});
