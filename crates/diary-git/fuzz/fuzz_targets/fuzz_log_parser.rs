#![no_main]

use diary_git::log::parse_log_output;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        let commits = parse_log_output(output);
        let lines = output.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(commits.len(), lines);
    }
});
