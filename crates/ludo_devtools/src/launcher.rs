//! Developer launcher actions.
//!
//! Each action runs one fixed external command. A missing program is not an
//! error for the launcher: it prints a message and carries on.

use std::ffi::OsString;
use std::io;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum LauncherAction {
    /// Build and start the game
    Run,
    /// Release build of the game
    Build,
    /// Build the game for the web (wasm32)
    Export,
    /// Open the sprite bank in the image editor
    Edit,
}

impl LauncherAction {
    pub const ALL: &'static [LauncherAction] = &[
        LauncherAction::Run,
        LauncherAction::Build,
        LauncherAction::Export,
        LauncherAction::Edit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Run => "Run Game",
            Self::Build => "Build",
            Self::Export => "Export Web",
            Self::Edit => "Edit Assets",
        }
    }

    /// Program and arguments.
    pub fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Run => ("cargo", RUN_ARGS),
            Self::Build => ("cargo", BUILD_ARGS),
            Self::Export => ("cargo", EXPORT_ARGS),
            Self::Edit => ("aseprite", EDIT_ARGS),
        }
    }
}

const RUN_ARGS: &[&str] = &["run", "--release", "-p", "ludo_game"];
const BUILD_ARGS: &[&str] = &["build", "--release", "-p", "ludo_game"];
const EXPORT_ARGS: &[&str] = &[
    "build",
    "--release",
    "-p",
    "ludo_game",
    "--target",
    "wasm32-unknown-unknown",
];
const EDIT_ARGS: &[&str] = &["assets/images/bank0.png"];

impl std::fmt::Display for LauncherAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Runs a program to completion and returns its exit code (`None` when it
/// was terminated by a signal).
pub trait CommandRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<Option<i32>>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<Option<i32>> {
        let status = Command::new(program).args(args).status()?;
        Ok(status.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exited(Option<i32>),
    NotFound(&'static str),
    Failed(String),
}

impl Outcome {
    pub fn message(&self, action: LauncherAction) -> String {
        match self {
            Self::Exited(Some(0)) => format!("{action}: finished"),
            Self::Exited(Some(code)) => format!("{action}: exited with code {code}"),
            Self::Exited(None) => format!("{action}: terminated by signal"),
            Self::NotFound(program) => format!("Command not found: {program}"),
            Self::Failed(reason) => format!("{action}: failed to start: {reason}"),
        }
    }
}

pub fn perform(action: LauncherAction, runner: &mut dyn CommandRunner) -> Outcome {
    let (program, args) = action.command();
    log::info!("{action}: {program} {}", args.join(" "));
    let outcome = match runner.run(program, args) {
        Ok(code) => Outcome::Exited(code),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Outcome::NotFound(program),
        Err(e) => Outcome::Failed(e.to_string()),
    };
    if !matches!(outcome, Outcome::Exited(_)) {
        println!("{}", outcome.message(action));
    }
    outcome
}

/// Whether a GUI can be shown. On X11/Wayland platforms this needs `DISPLAY`
/// or `WAYLAND_DISPLAY`; elsewhere a display is assumed.
pub fn display_available() -> bool {
    display_available_with(|key| std::env::var_os(key))
}

fn display_available_with(get_env: impl Fn(&str) -> Option<OsString>) -> bool {
    if !cfg!(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|&key| get_env(key).is_some_and(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeRunner {
        calls: Vec<(String, Vec<String>)>,
        result: Option<io::ErrorKind>,
        code: Option<i32>,
    }

    impl CommandRunner for FakeRunner {
        fn run(&mut self, program: &str, args: &[&str]) -> io::Result<Option<i32>> {
            self.calls.push((
                program.to_string(),
                args.iter().map(|a| a.to_string()).collect(),
            ));
            match self.result {
                Some(kind) => Err(io::Error::new(kind, "fake")),
                None => Ok(self.code),
            }
        }
    }

    #[test]
    fn run_invokes_game_command_once() {
        let mut runner = FakeRunner {
            code: Some(0),
            ..Default::default()
        };
        let outcome = perform(LauncherAction::Run, &mut runner);
        assert_eq!(outcome, Outcome::Exited(Some(0)));
        assert_eq!(
            runner.calls,
            vec![(
                "cargo".to_string(),
                vec!["run", "--release", "-p", "ludo_game"]
                    .into_iter()
                    .map(String::from)
                    .collect()
            )]
        );
    }

    #[test]
    fn each_action_spawns_its_fixed_program() {
        for &action in LauncherAction::ALL {
            let mut runner = FakeRunner::default();
            perform(action, &mut runner);
            let (program, args) = action.command();
            assert_eq!(runner.calls.len(), 1, "{action}");
            assert_eq!(runner.calls[0].0, program);
            assert_eq!(runner.calls[0].1, args.to_vec());
        }
    }

    #[test]
    fn export_targets_wasm() {
        let (_, args) = LauncherAction::Export.command();
        assert!(args.contains(&"wasm32-unknown-unknown"));
    }

    #[test]
    fn missing_program_is_swallowed() {
        let mut runner = FakeRunner {
            result: Some(io::ErrorKind::NotFound),
            ..Default::default()
        };
        let outcome = perform(LauncherAction::Edit, &mut runner);
        assert_eq!(outcome, Outcome::NotFound("aseprite"));
        assert_eq!(
            outcome.message(LauncherAction::Edit),
            "Command not found: aseprite"
        );
    }

    #[test]
    fn other_spawn_errors_are_reported() {
        let mut runner = FakeRunner {
            result: Some(io::ErrorKind::PermissionDenied),
            ..Default::default()
        };
        let outcome = perform(LauncherAction::Build, &mut runner);
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert!(outcome
            .message(LauncherAction::Build)
            .starts_with("Build: failed to start"));
    }

    #[test]
    fn nonzero_exit_is_described() {
        let outcome = Outcome::Exited(Some(101));
        assert_eq!(
            outcome.message(LauncherAction::Run),
            "Run Game: exited with code 101"
        );
    }

    #[test]
    fn display_detection_reads_environment() {
        let none = display_available_with(|_| None);
        let x11 = display_available_with(|key| (key == "DISPLAY").then(|| OsString::from(":0")));
        let wayland = display_available_with(|key| {
            (key == "WAYLAND_DISPLAY").then(|| OsString::from("wayland-0"))
        });
        let empty = display_available_with(|_| Some(OsString::new()));
        if cfg!(target_os = "linux") {
            assert!(!none);
            assert!(!empty);
        }
        assert!(x11);
        assert!(wayland);
    }
}
