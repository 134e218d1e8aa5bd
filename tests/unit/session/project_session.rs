use super::*;

use crate::foundation::error::CapletError;
use crate::render::engine::ScriptedEngine;
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("session_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn new_session_starts_with_one_default_character() {
    let session = ProjectSession::new("demo");
    assert_eq!(session.state().characters.len(), 1);
    assert_eq!(session.state().characters[0].name, "Character1");
    assert_eq!(
        session.state().characters[0].font_path,
        session.registry().first_path().unwrap()
    );
    assert!(session.last_outcome().is_none());
}

#[test]
fn build_failure_records_the_outcome_without_state_change() {
    let mut session = ProjectSession::new("");
    let before = session.state().clone();

    assert!(matches!(
        session.build_settings(),
        Err(CapletError::Validation(_))
    ));
    assert!(session.last_outcome().unwrap().contains("validation error"));
    assert_eq!(session.state(), &before);
}

#[test]
fn export_then_import_round_trips_through_a_fresh_session() {
    let mut session = ProjectSession::new("demo");
    session.set_image("photo.png", vec![1, 2, 3]);
    session.set_text("[Character1] says hi");
    session.upload_font(vec![9], "Fancy.ttf").unwrap();
    let id = session.state().characters[0].id;

    let archive = session.export().unwrap();
    assert!(session.last_outcome().unwrap().starts_with("exported archive"));

    let mut restored = ProjectSession::new("other");
    restored.import(&archive).unwrap();

    assert_eq!(restored.state().project_name, "demo");
    assert_eq!(restored.state().characters.len(), 1);
    assert_eq!(restored.state().characters[0].id, id);
    assert_eq!(restored.state().text_content, "[Character1] says hi");
    assert_eq!(restored.state().image.as_ref().unwrap().name, "photo.png");
    assert_eq!(
        restored.registry().font_bytes("custom/Fancy.ttf"),
        Some(&[9u8][..])
    );
}

#[test]
fn failed_import_leaves_prior_state_untouched() {
    let mut session = ProjectSession::new("demo");
    session.set_image("photo.png", vec![1]);
    session.set_text("hello");
    let before = session.state().clone();

    assert!(session.import(b"not an archive").is_err());
    assert_eq!(session.state(), &before);
    assert!(session.last_outcome().unwrap().contains("archive format error"));
}

#[test]
fn import_replaces_the_default_character_list() {
    let mut source = ProjectSession::new("demo");
    source.set_image("photo.png", vec![1]);
    let extra = source.add_character();
    source
        .update_character(
            extra,
            crate::project::model::CharacterPatch {
                name: Some("Hero".to_owned()),
                ..Default::default()
            },
        )
        .unwrap();
    let archive = source.export().unwrap();

    let mut target = ProjectSession::new("scratchpad");
    target.import(&archive).unwrap();
    let names: Vec<&str> = target
        .state()
        .characters
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Character1", "Hero"]);
}

#[test]
fn render_failure_diagnostic_becomes_the_outcome() {
    let mut session = ProjectSession::new("demo");
    session.set_image("photo.png", vec![1]);

    let mut invoker = RenderInvoker::new(scratch("diag"));
    let mut engine = ScriptedEngine::new().reply("UserError: bad font");
    let outcome = session.render(&mut invoker, &mut engine).unwrap();
    assert_eq!(
        outcome,
        RenderOutcome::Failed {
            message: "UserError: bad font".to_owned()
        }
    );
    assert_eq!(session.last_outcome(), Some("UserError: bad font"));
}

#[test]
fn render_success_records_byte_count() {
    let mut session = ProjectSession::new("demo");
    session.set_image("photo.png", vec![1]);

    let dir = scratch("success");
    std::fs::create_dir_all(dir.join("output")).unwrap();
    std::fs::write(dir.join("output").join("demo.png"), b"png!").unwrap();

    let mut invoker = RenderInvoker::new(&dir);
    let mut engine = ScriptedEngine::new().reply("Program finished in 0.01 seconds");
    let outcome = session.render(&mut invoker, &mut engine).unwrap();
    assert_eq!(
        outcome,
        RenderOutcome::Rendered {
            bytes: b"png!".to_vec()
        }
    );
    assert_eq!(session.last_outcome(), Some("rendered 4 bytes"));
}

#[test]
fn upload_font_repairs_characters_after_a_registry_reset() {
    let mut session = ProjectSession::new("demo");
    let id = session.state().characters[0].id;
    let resource = session.upload_font(vec![1], "Fancy.ttf").unwrap();
    session
        .update_character(
            id,
            crate::project::model::CharacterPatch {
                font_path: Some(resource.path.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(session.state().characters[0].font_path, "custom/Fancy.ttf");
    assert!(session.last_outcome().unwrap().contains("registered font"));
}

#[test]
fn bad_font_upload_records_the_outcome() {
    let mut session = ProjectSession::new("demo");
    assert!(matches!(
        session.upload_font(vec![1], "notafont.exe"),
        Err(CapletError::InvalidResource(_))
    ));
    assert!(
        session
            .last_outcome()
            .unwrap()
            .contains("invalid resource error")
    );
}
