#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(table) = tomldoc::from_str(input) {
            let rendered = tomldoc::to_string(&table);
            match tomldoc::from_str(&rendered) {
                Ok(reparsed) => {
                    // NaN never compares equal; skip documents containing it.
                    let has_nan = rendered.contains("nan");
                    if !has_nan && table != reparsed {
                        panic!(
                            "roundtrip mismatch!\nInput: {input}\nRendered: {rendered}\nReparsed: {reparsed:?}"
                        );
                    }
                }
                Err(e) => {
                    panic!("failed to reparse rendered output!\nRendered: {rendered}\nError: {e}");
                }
            }
        }
    }
});
