//! Argument builders for the external tools the Dock is driven through.
//!
//! Both the executed commands and the plan text shown to the user are built
//! here, so a dry run always prints what a real run would execute.

/// dockutil executable name
pub const DOCKUTIL: &str = "dockutil";

/// Preference domain of the Dock
pub const DOCK_DOMAIN: &str = "com.apple.dock";

/// Preference key for autohide
pub const AUTOHIDE_KEY: &str = "autohide";

/// Preference key for the autohide delay
pub const AUTOHIDE_DELAY_KEY: &str = "autohide-delay";

/// Process that gets signalled to reload the Dock
pub const DOCK_PROCESS: &str = "Dock";

const NO_RESTART: &str = "--no-restart";

/// Filesystem location of an app in the standard Applications folder
pub fn app_bundle_path(app_name: &str) -> String {
    format!("/Applications/{app_name}.app")
}

/// `dockutil` arguments that add an app, optionally at a 1-based position
pub fn add_app_args(app_name: &str, position: Option<usize>) -> Vec<String> {
    let mut args = vec!["--add".to_string(), app_bundle_path(app_name)];
    if let Some(pos) = position {
        args.push("--position".to_string());
        args.push(pos.to_string());
    }
    args.push(NO_RESTART.to_string());
    args
}

/// `dockutil` arguments that remove an entry by label
pub fn remove_args(label: &str) -> Vec<String> {
    vec![
        "--remove".to_string(),
        label.to_string(),
        NO_RESTART.to_string(),
    ]
}

/// `dockutil` arguments that clear every entry
pub fn remove_all_args() -> Vec<String> {
    remove_args("all")
}

/// `dockutil` arguments that add a folder tile
pub fn add_folder_args(path: &str, view: &str, display: &str, section: &str) -> Vec<String> {
    [
        "--add", path, "--view", view, "--display", display, "--section", section, NO_RESTART,
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

/// `defaults` arguments that write a boolean Dock preference
pub fn defaults_bool_args(key: &str, value: bool) -> Vec<String> {
    vec![
        "write".to_string(),
        DOCK_DOMAIN.to_string(),
        key.to_string(),
        "-bool".to_string(),
        value.to_string(),
    ]
}

/// `defaults` arguments that write a float Dock preference
pub fn defaults_float_args(key: &str, value: f64) -> Vec<String> {
    vec![
        "write".to_string(),
        DOCK_DOMAIN.to_string(),
        key.to_string(),
        "-float".to_string(),
        value.to_string(),
    ]
}

/// `killall` arguments that restart the Dock
pub fn restart_args() -> Vec<String> {
    vec![DOCK_PROCESS.to_string()]
}

/// Render a program and its arguments as a copy-pasteable shell line
pub fn render(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

fn quote(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`' | '&' | ';'));

    if needs_quotes {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}
