//! End-to-end generation over temporary project trees.

use indexmap::IndexMap;
use protoforge_codegen::{CONFIG_FILE_NAME, CodegenError, ExpandReport, Generator, PLUGINS_DIR};
use protoforge_schema::SchemaError;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"
types:
  Color: [Red, Green, Blue]
  Player:
    id: UserId
    color: Color
    score: int
  PlayerState:
    players: Player[]
    winner: UserId?
methods:
  joinGame:
  setColor:
    color: Color
auth:
  anonymous:
    separator: "_"
userState: PlayerState
error: string
tick: 50
"#;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, contents).expect("write");
}

fn project(parent: &Path, config: &str) -> std::path::PathBuf {
    let root = parent.join("space-race");
    write(&root.join(CONFIG_FILE_NAME), config);
    write(&root.join(PLUGINS_DIR).join("Color.tsx"), "export default {};\n");
    root
}

fn templates(parent: &Path) -> std::path::PathBuf {
    let dir = parent.join("templates");
    write(
        &dir.join("{{module}}/index.ts.hbs"),
        "// {{appName}}\n{{deltaPack}}",
    );
    write(
        &dir.join("{{module}}/methods.ts.hbs"),
        "{{#each methods}}{{requestName @key}}\n{{/each}}",
    );
    write(
        &dir.join("server/plugins.txt.hbs"),
        "{{#each plugins}}{{this}};{{/each}}tick={{tick}}",
    );
    write(&dir.join("static/keep.ts"), "export const raw = \"{{appName}}\";\n");
    dir
}

#[test]
fn test_generate_project() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = project(tmp.path(), CONFIG);
    let templates = templates(tmp.path());

    let report = Generator::new(&root)
        .templates(&templates)
        .substitution("module", "game")
        .generate()
        .expect("Failed to generate");
    assert_eq!(report, ExpandReport { rendered: 3, copied: 1 });

    let index = fs::read_to_string(root.join("game/index.ts")).expect("read");
    assert!(index.starts_with("// space-race\n"));
    assert!(index.contains("export enum Color {"));
    assert!(index.contains("export type PlayerState = {"));

    let methods = fs::read_to_string(root.join("game/methods.ts")).expect("read");
    assert_eq!(methods, "IJoinGameRequest\nISetColorRequest\n");

    let plugins = fs::read_to_string(root.join("server/plugins.txt")).expect("read");
    assert_eq!(plugins, "Color;tick=50");

    assert_eq!(
        fs::read(root.join("static/keep.ts")).expect("read"),
        fs::read(templates.join("static/keep.ts")).expect("read")
    );
}

#[test]
fn test_generate_free_function() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = project(tmp.path(), CONFIG);
    let templates = templates(tmp.path());

    let substitutions = IndexMap::from([("module".to_string(), "shared".to_string())]);
    protoforge_codegen::generate(&root, &templates, &substitutions).expect("Failed to generate");

    assert!(root.join("shared/index.ts").is_file());
    assert!(!root.join("{{module}}").exists());
}

#[test]
fn test_generate_to_separate_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = project(tmp.path(), CONFIG);
    let templates = templates(tmp.path());
    let output = tmp.path().join("out");

    Generator::new(&root)
        .templates(&templates)
        .output(&output)
        .substitution("module", "game")
        .generate()
        .expect("Failed to generate");

    assert!(output.join("game/index.ts").is_file());
    assert!(!root.join("game").exists());
}

#[test]
fn test_generate_rejects_missing_user_state() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = CONFIG.replace("userState: PlayerState", "userState: GameState");
    let root = project(tmp.path(), &config);
    let templates = templates(tmp.path());

    let err = Generator::new(&root)
        .templates(&templates)
        .generate()
        .expect_err("undeclared user state");
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::MissingUserState { .. })
    ));
    assert!(!root.join("static").exists());
}

#[test]
fn test_generate_keeps_partial_output_on_render_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = project(tmp.path(), CONFIG);
    let templates = tmp.path().join("templates");
    write(&templates.join("a.txt"), "first");
    write(&templates.join("b.ts.hbs"), "{{#each}}");

    let err = Generator::new(&root)
        .templates(&templates)
        .generate()
        .expect_err("broken template");
    assert!(matches!(err, CodegenError::Render { .. }));
    assert_eq!(fs::read_to_string(root.join("a.txt")).expect("read"), "first");
}
