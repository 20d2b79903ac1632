use super::*;

#[test]
fn splits_on_terminal_punctuation() {
    let s = split_sentences("First idea. Second one?  Third!  ");
    assert_eq!(s, vec!["First idea.", "Second one?", "Third!"]);
}

#[test]
fn keeps_unterminated_tail() {
    assert_eq!(split_sentences("Intro"), vec!["Intro"]);
    assert_eq!(split_sentences("One. Two"), vec!["One.", "Two"]);
    assert!(split_sentences("   ").is_empty());
}

#[test]
fn repeated_punctuation_stays_with_sentence() {
    assert_eq!(split_sentences("Wow!! Really?!"), vec!["Wow!!", "Really?!"]);
}

#[test]
fn normalize_capitalizes_and_terminates() {
    assert_eq!(normalize_sentence("intro"), "Intro.");
    assert_eq!(normalize_sentence("  what   now? "), "What now?");
    assert_eq!(normalize_sentence("Done!"), "Done!");
    assert_eq!(normalize_sentence("   "), "");
}

#[test]
fn duration_is_word_based_with_floor() {
    assert_eq!(estimate_duration("one two", 150.0, 2.5), 2.5);
    let long = vec!["word"; 30].join(" ");
    assert!((estimate_duration(&long, 150.0, 2.5) - 12.0).abs() < 1e-9);
    assert!((estimate_duration(&long, 0.0, 2.5) - 12.0).abs() < 1e-9);
}

#[test]
fn emphasis_prefers_phrases() {
    let phrases = vec!["Self attention".to_owned(), "attention heads".to_owned()];
    assert_eq!(
        extract_emphasis(&phrases, "irrelevant narration words", 2),
        vec!["Self".to_owned(), "attention".to_owned()]
    );
}

#[test]
fn emphasis_dedups_case_insensitively() {
    let phrases = vec!["Query query QUERY keys".to_owned()];
    assert_eq!(
        extract_emphasis(&phrases, "", 2),
        vec!["Query".to_owned(), "keys".to_owned()]
    );
}

#[test]
fn emphasis_falls_back_to_long_text_words() {
    assert_eq!(
        extract_emphasis(&[], "The model learns sparse, useful features.", 2),
        vec!["model".to_owned(), "learns".to_owned()]
    );
    assert!(extract_emphasis(&[], "a bit of it", 2).is_empty());
}
