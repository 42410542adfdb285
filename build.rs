use std::process::Command;

/// Run a command and return its trimmed stdout, if it succeeded.
fn stdout_of(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    // Shown by `ticktick --version`.
    let sha = stdout_of("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_GIT_SHA={sha}");

    let dirty = Command::new("git")
        .args(["diff", "--quiet"])
        .status()
        .map(|s| if s.success() { "" } else { "-dirty" })
        .unwrap_or("");
    println!("cargo:rustc-env=BUILD_GIT_DIRTY={dirty}");

    let date = stdout_of("date", &["-u", "+%Y-%m-%d"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={date}");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
}
