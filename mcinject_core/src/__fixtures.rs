use std::path::Path;

use crate::walker::BagBase;
use crate::walker::WalkerBag;

/// Records what the walker reports at every position.
#[derive(Debug, Default)]
pub struct RecordingBag {
	pub base: BagBase,
	pub marks: String,
	pub levels: Vec<usize>,
	pub events: Vec<String>,
}

impl WalkerBag for RecordingBag {
	fn base(&self) -> &BagBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut BagBase {
		&mut self.base
	}
}

pub const SWIFT_APP_DELEGATE: &str = r#"import UIKit

@UIApplicationMain
class AppDelegate: UIResponder, UIApplicationDelegate {

    var window: UIWindow?

    func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplicationLaunchOptionsKey: Any]?) -> Bool {
        // Override point for customization after application launch.
        return true
    }

    func applicationWillResignActive(_ application: UIApplication) {
    }
}
"#;

pub const SWIFT_APP_DELEGATE_INTEGRATED: &str = r#"import UIKit
import MobileCenter
import MobileCenterAnalytics

@UIApplicationMain
class AppDelegate: UIResponder, UIApplicationDelegate {

    var window: UIWindow?

    func application(_ application: UIApplication, didFinishLaunchingWithOptions launchOptions: [UIApplicationLaunchOptionsKey: Any]?) -> Bool {
        MSMobileCenter.start("secret", withServices: [MSAnalytics.self])
        // Override point for customization after application launch.
        return true
    }

    func applicationWillResignActive(_ application: UIApplication) {
    }
}
"#;

pub const OBJC_APP_DELEGATE: &str = r#"#import "AppDelegate.h"

@interface AppDelegate ()

@end

@implementation AppDelegate

- (BOOL)application:(UIApplication *)application didFinishLaunchingWithOptions:(NSDictionary *)launchOptions {
    // Override point for customization after application launch.
    return YES;
}

- (void)applicationWillResignActive:(UIApplication *)application {
}

@end
"#;

pub const OBJC_APP_DELEGATE_INTEGRATED: &str = r#"#import "AppDelegate.h"
@import MobileCenter;
@import MobileCenterCrashes;

@interface AppDelegate ()

@end

@implementation AppDelegate

- (BOOL)application:(UIApplication *)application didFinishLaunchingWithOptions:(NSDictionary *)launchOptions {
    [MSMobileCenter start:@"secret" withServices:@[[MSCrashes class]]];
    // Override point for customization after application launch.
    return YES;
}

- (void)applicationWillResignActive:(UIApplication *)application {
}

@end
"#;

pub const PODFILE: &str = "platform :ios, '9.0'
target 'App' do
  use_frameworks!
  pod 'Alamofire', '~> 4.0'

  target 'AppTests' do
    inherit! :search_paths
  end
end
";

/// Lay out `<root>/<name>.xcodeproj/project.pbxproj` and
/// `<root>/<name>/<delegate_name>` containing `delegate`.
pub fn create_xcode_project(root: &Path, name: &str, delegate_name: &str, delegate: &str) {
	let project_dir = root.join(format!("{name}.xcodeproj"));
	std::fs::create_dir_all(&project_dir).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	std::fs::write(project_dir.join("project.pbxproj"), "// !$*UTF8*$!\n{\n}\n")
		.unwrap_or_else(|e| panic!("write: {e}"));

	let files_dir = root.join(name);
	std::fs::create_dir_all(&files_dir).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	std::fs::write(files_dir.join(delegate_name), delegate).unwrap_or_else(|e| panic!("write: {e}"));
}

pub fn read(path: &Path) -> String {
	std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}
