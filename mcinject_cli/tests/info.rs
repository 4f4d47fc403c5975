mod common;

use mcinject_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn info_prints_project_paths() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let ios = tmp.path().join("ios");
	common::create_xcode_project(&ios, "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("App.xcodeproj"))
		.stdout(predicates::str::contains("AppDelegate.swift"))
		.stdout(predicates::str::contains("Swift"))
		.stdout(predicates::str::contains("(will be created)"));

	Ok(())
}

#[test]
fn info_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.m", common::OBJC_APP_DELEGATE)?;
	std::fs::write(tmp.path().join("Podfile"), "target 'App' do\nend\n")?;
	std::fs::write(tmp.path().join(".mcinject.toml"), "modules = [\"analytics\"]\n")?;

	let output = common::mcinject_cmd()
		.arg("info")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["config"], ".mcinject.toml");
	assert_eq!(value["project"]["name"], "App");
	assert_eq!(value["project"]["language"], "objective-c");
	assert_eq!(value["podfile_exists"], true);

	Ok(())
}

#[test]
fn info_reports_missing_app_delegate() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "ViewController.swift", "")?;

	common::mcinject_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("there is no AppDelegate file"));

	Ok(())
}
