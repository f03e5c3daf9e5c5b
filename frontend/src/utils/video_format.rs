/// A candidate `<source>` for the player: the file plus the type the browser should probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub src: String,
    pub mime_type: String,
}

const VIDEO_MIME_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("ogg", "video/ogg"),
    ("mov", "video/quicktime"),
    ("qt", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("mkv", "video/x-matroska"),
    ("3gp", "video/3gpp"),
    ("3g2", "video/3gpp2"),
    ("asf", "video/x-ms-asf"),
    ("rm", "video/vnd.rn-realvideo"),
    ("rmvb", "video/vnd.rn-realvideo"),
];

const MP4_CODECS: &[&str] = &[r#"video/mp4; codecs="avc1.42E01E, mp4a.40.2""#];

const WEBM_CODECS: &[&str] = &[
    r#"video/webm; codecs="vp8, vorbis""#,
    r#"video/webm; codecs="vp9, opus""#,
];

/// Lowercased text after the last `.`; the whole path when there is no dot.
pub fn extension(path: &str) -> String {
    path.rsplit('.').next().unwrap_or_default().to_lowercase()
}

pub fn primary_mime_type(extension: &str) -> Option<&'static str> {
    VIDEO_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

pub fn known_extensions() -> impl Iterator<Item = &'static str> {
    VIDEO_MIME_TYPES.iter().map(|(ext, _)| *ext)
}

/// Candidate sources for `path`, most generic first. Empty when the extension is unknown.
pub fn detect_formats(path: &str) -> Vec<SourceDescriptor> {
    let ext = extension(path);
    let Some(primary) = primary_mime_type(&ext) else {
        return Vec::new();
    };

    let variants: &[&str] = match ext.as_str() {
        "mp4" => MP4_CODECS,
        "webm" => WEBM_CODECS,
        _ => &[],
    };

    std::iter::once(primary)
        .chain(variants.iter().copied())
        .map(|mime_type| SourceDescriptor {
            src: path.to_string(),
            mime_type: mime_type.to_string(),
        })
        .collect()
}
