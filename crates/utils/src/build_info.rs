/// Git metadata captured at build time by `build.rs`.
pub(crate) struct BuildInfo {
    pub commit_sha1: Option<&'static str>,
    /// Raw `VERGEN_GIT_DIRTY` value, `"true"` or `"false"` when known.
    pub git_dirty: Option<&'static str>,
}

pub(crate) const BUILD_INFO: BuildInfo = BuildInfo {
    commit_sha1: option_env!("VERGEN_GIT_SHA"),
    git_dirty: option_env!("VERGEN_GIT_DIRTY"),
};
