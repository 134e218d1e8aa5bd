use super::*;

use crate::foundation::color::Rgba8;
use crate::project::model::{Character, CharacterId, ProjectImage, ProjectState};
use crate::settings::build::build;

fn sample_request(scratch: &Path) -> EngineRequest {
    let state = ProjectState {
        project_name: "demo".to_owned(),
        characters: vec![Character {
            id: CharacterId::from_u64(1),
            name: "Hero".to_owned(),
            font_path: "builtin/NotoSans-Regular.ttf".to_owned(),
            font_height: 1.0,
            stroke_width: 0.0,
            font_color: Rgba8::BLACK,
            stroke_color: Rgba8::WHITE,
        }],
        image: Some(ProjectImage {
            name: "photo.png".to_owned(),
            bytes: vec![1],
        }),
        ..ProjectState::default()
    };
    EngineRequest {
        image_path: scratch.join("photo.png"),
        text_path: scratch.join("input.txt"),
        settings: build(&state).unwrap(),
    }
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("process_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn is_available_is_false_for_a_nonexistent_program() {
    let engine = ProcessEngine::new("definitely-not-a-real-engine-binary");
    assert!(!engine.is_available());
}

#[test]
fn nonexistent_program_is_a_transport_fault() {
    let scratch = scratch("spawn_fault");
    let request = sample_request(&scratch);
    let mut engine = ProcessEngine::new("definitely-not-a-real-engine-binary");
    assert!(matches!(
        engine.render(&request),
        Err(CapletError::EngineUnavailable(_))
    ));
}

#[cfg(unix)]
#[test]
fn writes_a_toml_spec_next_to_the_inputs() {
    let scratch = scratch("spec_file");
    let request = sample_request(&scratch);

    // `cat <spec>` echoes the spec file back, standing in for an engine.
    let mut engine = ProcessEngine::new("/bin/cat");
    let reply = engine.render(&request).unwrap();

    assert!(scratch.join(SPEC_FILE).is_file());
    assert!(reply.contains("[image]"));
    assert!(reply.contains("art = \"photo.png\""));
    assert!(reply.contains("base_filename = \"demo\""));
    assert!(reply.contains("[[characters]]"));
    assert!(reply.contains("name = \"Hero\""));
}
