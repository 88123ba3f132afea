use canonical::{extract_sentences, SplitConfig};

struct Case {
    name: &'static str,
    input: &'static str,
    cfg: SplitConfig,
    expected: &'static [&'static str],
}

fn plain() -> SplitConfig {
    SplitConfig {
        strip_markup: false,
        strip_reference_markers: false,
        ..Default::default()
    }
}

#[test]
fn golden_corpus_regression() {
    let cases = [
        Case {
            name: "encyclopedia_paragraph",
            input: "<p>Mount Everest is Earth's highest mountain.[1] Its peak is 8,849 m high.[2][3]</p>\
                    <p>It lies in the Himalayas.[citation needed]</p>",
            cfg: SplitConfig::default(),
            expected: &[
                "Mount Everest is Earth's highest mountain.",
                "Its peak is 8,849 m high.",
                "It lies in the Himalayas.",
            ],
        },
        Case {
            name: "mixed_terminators",
            input: "Did it work? Yes it worked! Great news for everyone.",
            cfg: SplitConfig::default(),
            expected: &["Did it work?", "Yes it worked!", "Great news for everyone."],
        },
        Case {
            name: "newline_separated",
            input: "First line of text.\nSecond line of text.\n\nThird line here.",
            cfg: SplitConfig::default(),
            expected: &["First line of text.", "Second line of text.", "Third line here."],
        },
        Case {
            name: "lowercase_continuation",
            input: "A complete sentence here. and then lowercase trailing",
            cfg: plain(),
            expected: &["A complete sentence here. and then lowercase trailing"],
        },
        Case {
            name: "non_ascii_uppercase_start",
            input: "Das ist gut gemacht. \u{00DC}ber alles wichtig.",
            cfg: plain(),
            expected: &["Das ist gut gemacht.", "\u{00DC}ber alles wichtig."],
        },
        Case {
            name: "escaped_ampersand",
            input: "Fish &amp; chips are great. Salt &amp; vinegar too.",
            cfg: SplitConfig::default(),
            expected: &["Fish & chips are great.", "Salt & vinegar too."],
        },
    ];

    for case in cases {
        let sentences = extract_sentences(case.input, &case.cfg)
            .unwrap_or_else(|e| panic!("case {} failed: {e}", case.name));
        let expected: Vec<String> = case.expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(sentences, expected, "sentence mismatch for {}", case.name);
    }
}
