use std::process::Command;

fn main() {
  embed_build_info();
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}

// Embeds the commit hash and date into the binary for `--version`. Both
// values fall back to empty strings outside a Git checkout so the env!
// lookups in the CLI always resolve.
fn embed_build_info() {
  println!("cargo:rustc-env=GIT_HASH={}", git_output(&["rev-parse", "--short", "HEAD"]));
  println!("cargo:rustc-env=GIT_DATE={}", git_output(&["log", "-1", "--format=%cs"]));
}

fn git_output(args: &[&str]) -> String {
  Command::new("git")
    .args(args)
    .output()
    .ok()
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .unwrap_or_default()
    .trim()
    .to_string()
}
