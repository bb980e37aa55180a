use std::env;

fn main() {
    // Outside a git checkout the SHA is simply reported as unknown.
    if let Err(err) = emit_commit_info() {
        println!("cargo:warning=vergen: {err}");
    }

    let version = env::var("VERSION").unwrap_or_else(|_| "latest".to_string());
    println!("cargo:rustc-env=IMAGE_VERSION={version}");
    println!("cargo:rerun-if-env-changed=VERSION");
}

/// Emits `VERGEN_GIT_SHA` and `VERGEN_GIT_DIRTY` for `build_info`.
fn emit_commit_info() -> anyhow::Result<()> {
    let git = vergen_git2::Git2Builder::default()
        .sha(false)
        .dirty(true)
        .build()?;

    vergen_git2::Emitter::default()
        .fail_on_error()
        .add_instructions(&git)?
        .emit()
}
