use doccorpus::ops::{create_document, get_index};
use doccorpus::store::MemoryCollection;
use doccorpus::{DocId, InvertedIndex, NewDocument};
use time::macros::date;

fn input(id: i64, title: &str, text: &str) -> NewDocument {
    NewDocument {
        id: DocId::Int(id),
        title: title.into(),
        text: text.into(),
        date: date!(2023 - 09 - 14),
        category: "sports".into(),
    }
}

#[test]
fn titles_are_sorted_within_an_entry() {
    let col = MemoryCollection::new("docs");
    create_document(&col, input(2, "B", "sun")).unwrap();
    create_document(&col, input(1, "A", "sun sun")).unwrap();

    let index = get_index(&col).unwrap();
    assert_eq!(index.entry("sun").as_deref(), Some("A:2, B:1"));
}

#[test]
fn terms_enumerate_in_sorted_order() {
    let col = MemoryCollection::new("docs");
    create_document(&col, input(1, "Exercise", "Summer months, baseball!")).unwrap();
    create_document(&col, input(2, "Discovery", "months months months")).unwrap();
    create_document(&col, input(3, "Arizona", "Summer")).unwrap();

    let formatted = get_index(&col).unwrap().formatted();
    let terms: Vec<&str> = formatted.keys().map(String::as_str).collect();
    assert_eq!(terms, vec!["baseball", "months", "summer"]);
    assert_eq!(formatted["baseball"], "Exercise:1");
    assert_eq!(formatted["months"], "Discovery:3, Exercise:1");
    assert_eq!(formatted["summer"], "Arizona:1, Exercise:1");
}

#[test]
fn empty_collection_gives_empty_index() {
    let col = MemoryCollection::new("docs");
    let index = get_index(&col).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.terms().count(), 0);
}

#[test]
fn repeated_titles_accumulate() {
    let col = MemoryCollection::new("docs");
    create_document(&col, input(1, "Notes", "rain")).unwrap();
    create_document(&col, input(2, "Notes", "rain rain")).unwrap();
    create_document(&col, input(3, "Almanac", "Rain")).unwrap();

    let index: InvertedIndex = get_index(&col).unwrap();
    assert_eq!(index.count("rain", "Notes"), Some(3));
    assert_eq!(index.entry("rain").as_deref(), Some("Almanac:1, Notes:3"));
    assert_eq!(index.entry("snow"), None);
}
