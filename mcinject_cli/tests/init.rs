mod common;

use mcinject_core::AnyEmptyResult;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mcinject_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("mcinject integrate"));

	let content = std::fs::read_to_string(tmp.path().join("mcinject.toml"))?;
	assert!(content.contains("modules = [\"analytics\", \"crashes\"]"));
	assert!(content.contains("[project]"));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(".config/mcinject.toml"), "app_secret = \"keep\"\n")?;

	common::mcinject_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert!(!tmp.path().join("mcinject.toml").exists());
	let content = std::fs::read_to_string(tmp.path().join(".config/mcinject.toml"))?;
	assert_eq!(content, "app_secret = \"keep\"\n");

	Ok(())
}

#[test]
fn no_subcommand_fails() {
	common::mcinject_cmd().assert().code(1);
}
