#![no_main]

use balsa_syntax::{parse, reparse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u16, u16, &str)| {
    let (text, a, b, with) = input;
    let clamp = |at: u16| {
        let mut at = usize::from(at).min(text.len());
        while !text.is_char_boundary(at) {
            at -= 1;
        }
        at
    };
    let (a, b) = (clamp(a), clamp(b));
    let range = a.min(b)..a.max(b);

    let mut edited = text.to_string();
    edited.replace_range(range.clone(), with);

    let mut root = parse(text);
    reparse(&mut root, &edited, range, with.len());
    assert_eq!(root.full_text(), edited);
});
