mod common;

use mcinject_core::AnyEmptyResult;

#[test]
fn remove_restores_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;
	std::fs::write(
		tmp.path().join("Podfile"),
		"target 'App' do\n  pod 'Alamofire'\nend\n",
	)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret", "--analytics", "--crashes", "--distribute"])
		.assert()
		.success();

	common::mcinject_cmd()
		.arg("remove")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated 2 file(s)"));

	let delegate = std::fs::read_to_string(tmp.path().join("App/AppDelegate.swift"))?;
	assert_eq!(delegate, common::SWIFT_APP_DELEGATE);
	let podfile = std::fs::read_to_string(tmp.path().join("Podfile"))?;
	assert_eq!(podfile, "target 'App' do\n  pod 'Alamofire'\nend\n");

	Ok(())
}

#[test]
fn remove_dry_run_lists_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.m", common::OBJC_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret", "--crashes"])
		.assert()
		.success();
	let integrated = std::fs::read_to_string(tmp.path().join("App/AppDelegate.m"))?;

	common::mcinject_cmd()
		.arg("remove")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run: would update 2 file(s):"))
		.stdout(predicates::str::contains("AppDelegate.m"));

	let delegate = std::fs::read_to_string(tmp.path().join("App/AppDelegate.m"))?;
	assert_eq!(delegate, integrated);

	Ok(())
}

#[test]
fn remove_without_sdk_is_a_no_op() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("remove")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	assert!(!tmp.path().join("Podfile").exists());

	Ok(())
}
