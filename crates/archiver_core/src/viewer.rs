/// Where the replay viewer page is served from.
pub const VIEWER_PAGE: &str = "/viewer.html";
/// Path prefix of raw archive byte streams.
pub const ARCHIVE_STREAM_PREFIX: &str = "/api/archives/";

/// URLs needed to embed the replay viewer for one archive.
///
/// The viewer URL doubles as the embed identity: two targets compare equal
/// only when their viewer URLs match, so a changed selection always means a
/// fresh viewer instead of an in-place update.
#[derive(Debug, Clone, Eq)]
pub struct ViewerTarget {
    pub archive: String,
    pub source_url: String,
    pub viewer_url: String,
}

impl PartialEq for ViewerTarget {
    fn eq(&self, other: &Self) -> bool {
        self.viewer_url == other.viewer_url
    }
}

impl ViewerTarget {
    pub fn key(&self) -> &str {
        &self.viewer_url
    }
}

/// Builds the viewer target for the selected archive; `None` when nothing is
/// selected.
pub fn viewer_target(selected: &str) -> Option<ViewerTarget> {
    if selected.is_empty() {
        return None;
    }
    let source_url = format!("{ARCHIVE_STREAM_PREFIX}{selected}");
    let viewer_url = format!("{VIEWER_PAGE}?source={}", urlencoding::encode(&source_url));
    Some(ViewerTarget {
        archive: selected.to_string(),
        source_url,
        viewer_url,
    })
}
