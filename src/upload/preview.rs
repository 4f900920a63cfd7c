/// What the widget currently shows in its preview area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Preview {
    #[default]
    Empty,
    /// Data URI produced from a selected file.
    Decoded(String),
    /// URL handed in by the host for view or edit display.
    External(String),
}

impl Preview {
    /// Picks the view value first, then the edit value. Empty strings count
    /// as absent.
    pub fn initial(view: Option<&str>, edit: Option<&str>) -> Self {
        view.filter(|v| !v.is_empty())
            .or_else(|| edit.filter(|e| !e.is_empty()))
            .map(|url| Preview::External(url.to_string()))
            .unwrap_or_default()
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Preview::Empty => None,
            Preview::Decoded(uri) | Preview::External(uri) => Some(uri),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty)
    }
}

/// Rewrites the media type of a base64 `data:` URI to `mime`.
///
/// Browsers label a file with no reported type `application/octet-stream`
/// (or leave the type blank); the preview needs the type the accept policy
/// resolved. URIs that already carry `mime`, or that are not base64 data
/// URIs, are returned unchanged.
pub fn retag_data_uri(uri: String, mime: &str) -> String {
    let retagged = match uri.strip_prefix("data:").and_then(|rest| rest.split_once(";base64,")) {
        Some((current, payload)) if !current.eq_ignore_ascii_case(mime) => {
            Some(format!("data:{};base64,{}", mime, payload))
        }
        _ => None,
    };
    retagged.unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_value_takes_precedence() {
        let preview = Preview::initial(Some("https://cdn/thumb.png"), Some("https://cdn/old.png"));
        assert_eq!(preview, Preview::External("https://cdn/thumb.png".into()));
    }

    #[test]
    fn edit_value_used_without_view_value() {
        assert_eq!(
            Preview::initial(None, Some("https://cdn/old.png")).source(),
            Some("https://cdn/old.png")
        );
        assert_eq!(
            Preview::initial(Some(""), Some("https://cdn/old.png")).source(),
            Some("https://cdn/old.png")
        );
    }

    #[test]
    fn nothing_supplied_is_empty() {
        assert!(Preview::initial(None, None).is_empty());
        assert!(Preview::initial(Some(""), Some("")).is_empty());
    }

    #[test]
    fn matching_type_is_left_alone() {
        let uri = "data:image/png;base64,iVBORw==".to_string();
        assert_eq!(retag_data_uri(uri.clone(), "image/png"), uri);
    }

    #[test]
    fn untyped_file_gets_resolved_type() {
        assert_eq!(
            retag_data_uri("data:application/octet-stream;base64,iVBORw==".into(), "image/png"),
            "data:image/png;base64,iVBORw=="
        );
        assert_eq!(
            retag_data_uri("data:;base64,AAAA".into(), "video/mp4"),
            "data:video/mp4;base64,AAAA"
        );
    }

    #[test]
    fn empty_file_keeps_empty_payload() {
        assert_eq!(retag_data_uri("data:;base64,".into(), "video/mp4"), "data:video/mp4;base64,");
    }

    #[test]
    fn non_base64_uri_is_untouched() {
        assert_eq!(retag_data_uri("data:,".into(), "image/png"), "data:,");
        assert_eq!(retag_data_uri("https://cdn/thumb.png".into(), "image/png"), "https://cdn/thumb.png");
    }
}
