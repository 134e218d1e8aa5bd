use super::*;

use crate::project::model::CharacterId;

fn sample_state() -> ProjectState {
    ProjectState {
        project_name: "demo".to_owned(),
        characters: vec![
            Character {
                id: CharacterId::from_u64(3),
                name: "Hero".to_owned(),
                font_path: "builtin/NotoSans-Regular.ttf".to_owned(),
                font_height: 1.5,
                stroke_width: 0.5,
                font_color: Rgba8::rgba(0x10, 0x20, 0x30, 0x80),
                stroke_color: Rgba8::WHITE,
            },
            Character {
                id: CharacterId::from_u64(1),
                name: "Villain".to_owned(),
                font_path: "custom/Evil.ttf".to_owned(),
                font_height: 0.8,
                stroke_width: 2.0,
                font_color: Rgba8::BLACK,
                stroke_color: Rgba8::rgb(0xff, 0x00, 0x00),
            },
        ],
        text_content: "[Hero] says hi\n[Villain] laughs".to_owned(),
        text_position: TextPosition::Bottom,
        text_alignment: TextAlignment::Right,
        credits: vec!["line one".to_owned(), "line two".to_owned()],
        credits_position: CreditsPosition::Top,
        background_color: Rgba8::rgb(0x12, 0x34, 0x56),
        image: Some(ProjectImage {
            name: "photo.png".to_owned(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }),
    }
}

fn zip_with_entries(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn export_requires_an_image() {
    let mut state = sample_state();
    state.image = None;
    let registry = FontRegistry::new();
    assert!(matches!(
        export_archive(&state, &registry),
        Err(CapletError::ExportPrecondition(_))
    ));
}

#[test]
fn export_requires_a_project_name() {
    let mut state = sample_state();
    state.project_name = "  ".to_owned();
    let registry = FontRegistry::new();
    assert!(matches!(
        export_archive(&state, &registry),
        Err(CapletError::ExportPrecondition(_))
    ));
}

#[test]
fn export_writes_all_entry_kinds() {
    let state = sample_state();
    let mut registry = FontRegistry::new();
    registry.register(vec![9, 9], "Evil.ttf").unwrap();

    let bytes = export_archive(&state, &registry).unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&"image/photo.png"));
    assert!(names.contains(&"text.txt"));
    assert!(names.contains(&"settings.json"));
    assert!(names.contains(&"fonts/Evil.ttf"));
}

#[test]
fn import_rejects_non_archives() {
    assert!(matches!(
        import_archive(b"definitely not a zip"),
        Err(CapletError::ArchiveFormat(_))
    ));
}

#[test]
fn import_requires_the_metadata_entry() {
    let bytes = zip_with_entries(&[("image/photo.png", b"x"), ("text.txt", b"hi")]);
    assert!(matches!(
        import_archive(&bytes),
        Err(CapletError::ArchiveFormat(_))
    ));
}

#[test]
fn import_rejects_unparsable_metadata() {
    let bytes = zip_with_entries(&[
        ("image/photo.png", b"x"),
        ("settings.json", b"{ not json"),
    ]);
    assert!(matches!(
        import_archive(&bytes),
        Err(CapletError::ArchiveFormat(_))
    ));
}

#[test]
fn import_rejects_multibyte_color_metadata() {
    let bytes = zip_with_entries(&[
        ("image/photo.png", b"x"),
        (
            "settings.json",
            r#"{ "projectName": "demo", "image": { "backgroundColor": "aaaé." } }"#.as_bytes(),
        ),
    ]);
    assert!(matches!(
        import_archive(&bytes),
        Err(CapletError::ArchiveFormat(_))
    ));
}

#[test]
fn import_requires_an_image_entry() {
    let bytes = zip_with_entries(&[("settings.json", br#"{ "projectName": "demo" }"#)]);
    assert!(matches!(
        import_archive(&bytes),
        Err(CapletError::MissingAsset(_))
    ));
}

#[test]
fn image_entry_is_located_by_prefix_not_exact_name() {
    // The metadata's image name is advisory; the entry path is the filename
    // of record even when the two disagree.
    let bytes = zip_with_entries(&[
        (
            "settings.json",
            br#"{ "projectName": "demo", "image": { "name": "stale.png" } }"#,
        ),
        ("image/whatever-name.jpg", b"img"),
    ]);
    let contents = import_archive(&bytes).unwrap();
    assert_eq!(contents.image.name, "whatever-name.jpg");
    assert_eq!(contents.image.bytes, b"img");
}

#[test]
fn missing_text_entry_is_tolerated_as_empty() {
    let bytes = zip_with_entries(&[
        ("settings.json", br#"{ "projectName": "demo" }"#),
        ("image/photo.png", b"img"),
    ]);
    let contents = import_archive(&bytes).unwrap();
    assert_eq!(contents.text_content, "");
    assert!(contents.characters.is_empty());
}

#[test]
fn round_trip_reproduces_state_and_fonts() {
    let state = sample_state();
    let mut registry = FontRegistry::new();
    registry.register(vec![9, 9], "Evil.ttf").unwrap();
    registry.register(vec![7], "Second.ttf").unwrap();

    let bytes = export_archive(&state, &registry).unwrap();
    let contents = import_archive(&bytes).unwrap();

    assert_eq!(contents.project_name, state.project_name);
    assert_eq!(contents.image, state.image.clone().unwrap());
    assert_eq!(contents.background_color, state.background_color);
    assert_eq!(contents.text_content, state.text_content);
    assert_eq!(contents.text_position, state.text_position);
    assert_eq!(contents.text_alignment, state.text_alignment);
    assert_eq!(contents.credits, state.credits);
    assert_eq!(contents.credits_position, state.credits_position);

    // Character order and ids survive verbatim.
    let expected: Vec<CharacterDraft> = state.characters.iter().cloned().map(Into::into).collect();
    assert_eq!(contents.characters, expected);

    assert_eq!(
        contents.fonts,
        vec![
            ("Evil.ttf".to_owned(), vec![9u8, 9]),
            ("Second.ttf".to_owned(), vec![7u8]),
        ]
    );
}
