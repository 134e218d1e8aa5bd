use super::*;

use crate::foundation::color::Rgba8;
use crate::project::model::CharacterId;

fn character(name: &str) -> Character {
    Character {
        id: CharacterId::from_u64(1),
        name: name.to_owned(),
        font_path: String::new(),
        font_height: 1.0,
        stroke_width: 0.0,
        font_color: Rgba8::BLACK,
        stroke_color: Rgba8::WHITE,
    }
}

#[test]
fn tag_wraps_the_name() {
    assert_eq!(tag("Hero"), "[Hero]");
}

#[test]
fn referenced_names_dedupes_in_first_appearance_order() {
    let names = referenced_names("[Hero] says hi. [Villain] laughs. [Hero] replies.");
    assert_eq!(names, vec!["Hero".to_owned(), "Villain".to_owned()]);
}

#[test]
fn unterminated_bracket_is_literal_text() {
    assert!(referenced_names("a [Hero without end").is_empty());
    assert_eq!(referenced_names("[A] then [broken"), vec!["A".to_owned()]);
}

#[test]
fn empty_tags_are_skipped() {
    assert!(referenced_names("[] [ ]").len() == 1);
    assert_eq!(referenced_names("[]"), Vec::<String>::new());
}

#[test]
fn nested_open_bracket_restarts_the_scan() {
    assert_eq!(referenced_names("[bad[Hero]"), vec!["Hero".to_owned()]);
}

#[test]
fn unresolved_tags_reports_unknown_names_only() {
    let characters = vec![character("Hero")];
    let unresolved = unresolved_tags("[Hero] meets [Stranger]", &characters);
    assert_eq!(unresolved, vec!["Stranger".to_owned()]);
}

#[test]
fn unresolved_tags_is_empty_when_everything_resolves() {
    let characters = vec![character("Hero")];
    assert!(unresolved_tags("[Hero] says hi", &characters).is_empty());
}
