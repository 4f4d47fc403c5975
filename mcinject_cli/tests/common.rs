#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub const SWIFT_APP_DELEGATE: &str = "import UIKit

@UIApplicationMain
class AppDelegate: UIResponder, UIApplicationDelegate {

    var window: UIWindow?

    func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplicationLaunchOptionsKey: Any]?) -> Bool {
        return true
    }
}
";

pub const OBJC_APP_DELEGATE: &str = "#import \"AppDelegate.h\"

@implementation AppDelegate

- (BOOL)application:(UIApplication *)application didFinishLaunchingWithOptions:(NSDictionary *)launchOptions {
    return YES;
}

@end
";

pub fn mcinject_cmd() -> Command {
	let mut cmd = Command::cargo_bin("mcinject").unwrap_or_else(|e| panic!("cargo_bin: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd
}

/// Lay out `<root>/<name>.xcodeproj/project.pbxproj` and
/// `<root>/<name>/<delegate_name>`.
pub fn create_xcode_project(
	root: &Path,
	name: &str,
	delegate_name: &str,
	delegate: &str,
) -> std::io::Result<()> {
	let project_dir = root.join(format!("{name}.xcodeproj"));
	std::fs::create_dir_all(&project_dir)?;
	std::fs::write(project_dir.join("project.pbxproj"), "// !$*UTF8*$!\n")?;

	let files_dir = root.join(name);
	std::fs::create_dir_all(&files_dir)?;
	std::fs::write(files_dir.join(delegate_name), delegate)
}
