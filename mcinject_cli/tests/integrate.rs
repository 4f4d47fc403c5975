mod common;

use mcinject_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn integrate_swift_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret", "--analytics", "--crashes"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated 2 file(s) in project App."));

	let delegate = std::fs::read_to_string(tmp.path().join("App/AppDelegate.swift"))?;
	assert!(delegate.contains("import UIKit\nimport MobileCenter\nimport MobileCenterAnalytics\nimport MobileCenterCrashes\n"));
	assert!(delegate.contains(
		"-> Bool {\n        MSMobileCenter.start(\"secret\", withServices: [MSAnalytics.self, MSCrashes.self])\n        return true"
	));

	let podfile = std::fs::read_to_string(tmp.path().join("Podfile"))?;
	assert_eq!(
		podfile,
		"platform :ios, '8.0'\ntarget 'App' do\n  use_frameworks!\n  pod 'MobileCenter/MobileCenterAnalytics'\n  pod 'MobileCenter/MobileCenterCrashes'\nend\n"
	);

	Ok(())
}

#[test]
fn integrate_objc_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.m", common::OBJC_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--app-secret", "secret", "--distribute"])
		.assert()
		.success();

	let delegate = std::fs::read_to_string(tmp.path().join("App/AppDelegate.m"))?;
	assert!(delegate.contains("#import \"AppDelegate.h\"\n@import MobileCenter;\n@import MobileCenterDistribute;\n"));
	assert!(delegate.contains(
		"launchOptions {\n    [MSMobileCenter start:@\"secret\" withServices:@[[MSDistribute class]]];\n    return YES;"
	));

	Ok(())
}

#[test]
fn integrate_twice_changes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;

	for _ in 0..2 {
		common::mcinject_cmd()
			.arg("integrate")
			.arg("--path")
			.arg(tmp.path())
			.args(["-s", "secret", "--analytics"])
			.assert()
			.success();
	}
	let first = std::fs::read_to_string(tmp.path().join("App/AppDelegate.swift"))?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret", "--analytics"])
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	let second = std::fs::read_to_string(tmp.path().join("App/AppDelegate.swift"))?;
	assert_eq!(first, second);
	assert_eq!(second.matches("MSMobileCenter.start").count(), 1);

	Ok(())
}

#[test]
fn integrate_dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret", "--analytics", "--dry-run", "--diff"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run: would update 2 file(s):"))
		.stdout(predicates::str::contains("Podfile"))
		.stderr(predicates::str::contains(
			"+        MSMobileCenter.start(\"secret\", withServices: [MSAnalytics.self])",
		))
		.stderr(predicates::str::contains("+platform :ios, '8.0'"));

	assert!(!tmp.path().join("Podfile").exists());
	let delegate = std::fs::read_to_string(tmp.path().join("App/AppDelegate.swift"))?;
	assert_eq!(delegate, common::SWIFT_APP_DELEGATE);

	Ok(())
}

#[test]
fn integrate_reads_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;
	std::fs::write(
		tmp.path().join("mcinject.toml"),
		"app_secret = \"from-config\"\nmodules = [\"crashes\"]\n\n[format]\nswift_indent = \"    \"\n",
	)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let delegate = std::fs::read_to_string(tmp.path().join("App/AppDelegate.swift"))?;
	assert!(delegate.contains(
		"{\n    MSMobileCenter.start(\"from-config\", withServices: [MSCrashes.self])\n"
	));

	Ok(())
}

#[test]
fn integrate_without_secret_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(tmp.path(), "App", "AppDelegate.swift", common::SWIFT_APP_DELEGATE)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--analytics")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no app secret was provided"));

	Ok(())
}

#[test]
fn integrate_without_method_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_xcode_project(
		tmp.path(),
		"App",
		"AppDelegate.swift",
		"class AppDelegate {\n}\n",
	)?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("function 'application' is not defined"))
		.stdout(predicates::str::contains("Updated").not());

	assert!(!tmp.path().join("Podfile").exists());

	Ok(())
}

#[test]
fn integrate_without_project_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mcinject_cmd()
		.arg("integrate")
		.arg("--path")
		.arg(tmp.path())
		.args(["-s", "secret"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("there is no *.pbxproj file"));

	Ok(())
}
