#![no_main]

use balsa_syntax::parse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let root = parse(text);
    assert_eq!(root.full_text(), text);
    assert_eq!(root.width(), text.len());
});
