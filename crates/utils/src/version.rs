use std::sync::LazyLock;

use crate::build_info::BUILD_INFO;

const SHORT_SHA_LEN: usize = 8;

/// Release version, e.g. `1.2.0-3f9a1c2e` or `latest-unknown-dirty`.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}-{}{}",
        env!("IMAGE_VERSION"),
        short_sha(BUILD_INFO.commit_sha1),
        dirty_suffix(BUILD_INFO.git_dirty)
    )
});

fn short_sha(sha: Option<&str>) -> &str {
    match sha {
        Some(sha) => sha.get(..SHORT_SHA_LEN).unwrap_or(sha),
        None => "unknown",
    }
}

fn dirty_suffix(git_dirty: Option<&str>) -> &'static str {
    if git_dirty == Some("true") {
        "-dirty"
    } else {
        ""
    }
}
