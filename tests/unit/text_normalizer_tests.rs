/*!
 * Tests for transcript text cleanup
 */

use capsync::text_normalizer::{normalize, normalize_opt};

/// Test the canonical messy transcript line
#[test]
fn test_normalize_withMessyText_shouldProduceCleanSentences() {
    assert_eq!(normalize("  hello   world .  how are you ?"), "Hello world. How are you?");
}

/// Test markup tags are removed entirely
#[test]
fn test_normalize_withMarkup_shouldStripTags() {
    assert_eq!(normalize("<i>hi</i> there"), "Hi there");
    assert_eq!(normalize("<font color=\"red\">warning</font>!"), "Warning!");
}

/// Test empty and absent input
#[test]
fn test_normalize_withEmptyInput_shouldReturnEmpty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" \t\n "), "");
    assert_eq!(normalize_opt(None), "");
    assert_eq!(normalize_opt(Some("ok")), "Ok");
}

/// Test every sentence start is capitalized
#[test]
fn test_normalize_withSeveralSentences_shouldCapitalizeEach() {
    assert_eq!(normalize("one. two! three? four"), "One. Two! Three? Four");
}

/// Test output never holds a newline or double space
#[test]
fn test_normalize_withLineBreaks_shouldProduceSingleLine() {
    let result = normalize("first line\nsecond\r\n\tthird");

    assert_eq!(result, "First line second third");
    assert!(!result.contains('\n'));
    assert!(!result.contains("  "));
}

/// Test normalizing twice changes nothing
#[test]
fn test_normalize_appliedTwice_shouldBeIdempotent() {
    let inputs = [
        "  hello   world .  how are you ?",
        "a <b>bold</b> . move",
        "<i></i>  x",
        "wait . . . what ?",
        "élan vital. über alles",
    ];

    for input in inputs {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
    }
}
