use assert_cmd::Command;
use doctag_core::AnyEmptyResult;
use similar_asserts::assert_eq;

const CONFIG: &str = "param1: \"*[\"\nparam2: \"] \"\nreturn1: \"### Return\"\nignore: \"@nodoc\"\n";

const TEMPLATE: &str = r#"[
  {
    "id": "class_rtcengine",
    "name": "RtcEngine",
    "description": "The engine.",
    "parameters": [],
    "is_hide": false
  },
  {
    "id": "api_rtcengine_joinchannel",
    "name": "joinChannel",
    "description": "Joins a channel.",
    "parameters": [{ "token": "The access token." }],
    "returns": "0 on success.",
    "is_hide": false
  },
  {
    "id": "api_rtcengine_release",
    "name": "release",
    "description": "Releases the engine.",
    "parameters": [],
    "is_hide": false
  }
]"#;

#[test]
fn documents_a_ts_export_tree_end_to_end() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("fmt.yaml"), CONFIG)?;
	std::fs::write(tmp.path().join("template.json"), TEMPLATE)?;
	std::fs::write(tmp.path().join("index.ts"), "export * from './engine';\n")?;
	std::fs::write(
		tmp.path().join("engine.ts"),
		"export class RtcEngine {\n  joinChannel(token: string): number {\n    return 0;\n  }\n}\n",
	)?;

	let mut cmd = Command::cargo_bin("doctag")?;
	cmd.arg("--config")
		.arg(tmp.path().join("fmt.yaml"))
		.arg("--template")
		.arg(tmp.path().join("template.json"))
		.arg("--language")
		.arg("ts")
		.arg("--export-file-path")
		.arg(tmp.path().join("index.ts"))
		.assert()
		.success()
		.stdout(predicates::str::contains("Documented 2 source file(s)."));

	let engine = std::fs::read_to_string(tmp.path().join("engine.ts"))?;
	assert_eq!(
		engine,
		"/// The engine.\n\
		 export class RtcEngine {\n\
		 /// Joins a channel.\n\
		 ///\n\
		 /// *[token] The access token.\n\
		 ///\n\
		 /// ### Return\n\
		 /// 0 on success.\n  \
		 joinChannel(token: string): number {\n    \
		 return 0;\n  \
		 }\n\
		 }"
	);
	assert!(!tmp.path().join("engine.ts.backup").exists());
	assert!(!tmp.path().join("index.ts.backup").exists());

	Ok(())
}

#[test]
fn documents_a_dart_export_list() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("fmt.yaml"), CONFIG)?;
	std::fs::write(tmp.path().join("template.json"), TEMPLATE)?;
	std::fs::write(tmp.path().join("export.dart"), "export 'engine.dart';\n")?;
	std::fs::write(
		tmp.path().join("engine.dart"),
		"class RtcEngine {\n  void release() {\n  }\n}\n",
	)?;

	let mut cmd = Command::cargo_bin("doctag")?;
	cmd.arg("--config")
		.arg(tmp.path().join("fmt.yaml"))
		.arg("--template")
		.arg(tmp.path().join("template.json"))
		.arg("--language")
		.arg("dart")
		.arg("--export-file-path")
		.arg(tmp.path().join("export.dart"))
		.assert()
		.success()
		.stdout(predicates::str::contains("Documented 1 source file(s)."));

	let engine = std::fs::read_to_string(tmp.path().join("engine.dart"))?;
	assert_eq!(
		engine,
		"/// The engine.\n\
		 class RtcEngine {\n\
		 /// Releases the engine.\n  \
		 void release() {\n  \
		 }\n\
		 }"
	);

	// The export list itself is not rewritten.
	let export = std::fs::read_to_string(tmp.path().join("export.dart"))?;
	assert_eq!(export, "export 'engine.dart';\n");

	Ok(())
}

#[test]
fn unresolved_tags_become_the_ignore_comment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("fmt.yaml"), CONFIG)?;
	std::fs::write(tmp.path().join("template.json"), TEMPLATE)?;
	std::fs::write(tmp.path().join("widget.cs"), "public class Widget\n{\n}\n")?;

	let mut cmd = Command::cargo_bin("doctag")?;
	cmd.arg("--config")
		.arg(tmp.path().join("fmt.yaml"))
		.arg("--template")
		.arg(tmp.path().join("template.json"))
		.arg("--language")
		.arg("csharp")
		.arg("--export-file-path")
		.arg(tmp.path().join("widget.cs"))
		.assert()
		.success();

	let widget = std::fs::read_to_string(tmp.path().join("widget.cs"))?;
	assert_eq!(widget, "/// @nodoc\npublic class Widget\n{\n}");

	Ok(())
}

#[test]
fn debug_show_tag_keeps_unresolved_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("fmt.yaml"), CONFIG)?;
	std::fs::write(tmp.path().join("template.json"), TEMPLATE)?;
	std::fs::write(tmp.path().join("widget.cs"), "public class Widget\n{\n}\n")?;

	let mut cmd = Command::cargo_bin("doctag")?;
	cmd.arg("--config")
		.arg(tmp.path().join("fmt.yaml"))
		.arg("--template")
		.arg(tmp.path().join("template.json"))
		.arg("--language")
		.arg("csharp")
		.arg("--export-file-path")
		.arg(tmp.path().join("widget.cs"))
		.arg("--debug-show-tag")
		.assert()
		.success();

	let widget = std::fs::read_to_string(tmp.path().join("widget.cs"))?;
	assert_eq!(widget, "/* class_widget */\npublic class Widget\n{\n}");

	Ok(())
}

#[test]
fn a_template_source_is_required() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("fmt.yaml"), CONFIG)?;
	std::fs::write(tmp.path().join("widget.cs"), "public class Widget\n{\n}\n")?;

	let mut cmd = Command::cargo_bin("doctag")?;
	cmd.arg("--config")
		.arg(tmp.path().join("fmt.yaml"))
		.arg("--language")
		.arg("csharp")
		.arg("--export-file-path")
		.arg(tmp.path().join("widget.cs"))
		.assert()
		.failure()
		.stderr(predicates::str::contains("required"));

	Ok(())
}

#[test]
fn an_unreachable_template_url_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("fmt.yaml"), CONFIG)?;
	std::fs::write(tmp.path().join("widget.cs"), "public class Widget\n{\n}\n")?;

	let mut cmd = Command::cargo_bin("doctag")?;
	cmd.arg("--config")
		.arg(tmp.path().join("fmt.yaml"))
		.arg("--template-url")
		.arg("http://127.0.0.1:1/template.json")
		.arg("--language")
		.arg("csharp")
		.arg("--export-file-path")
		.arg(tmp.path().join("widget.cs"))
		.assert()
		.failure()
		.stderr(predicates::str::contains("failed to fetch template"));

	Ok(())
}
