//! Post-processing of exported asset bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::source::RemoteItem;
use crate::{Error, Result};

/// Transforms exported bytes before they are written to disk.
pub trait ContentProcessor: Send + Sync {
    fn process(&self, item: &RemoteItem, content: Vec<u8>) -> Result<Vec<u8>>;
}

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());
static PAINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(fill|stroke)="([^"]*)""#).unwrap());

/// Leaves exported bytes untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ContentProcessor for Passthrough {
    fn process(&self, _item: &RemoteItem, content: Vec<u8>) -> Result<Vec<u8>> {
        Ok(content)
    }
}

/// Options for [`SvgProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgOptions {
    /// Drop `<!-- ... -->` comments and whitespace between tags.
    pub strip_comments: bool,
    /// Rewrite every solid `fill`/`stroke` colour to `currentColor`.
    pub monochrome: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            strip_comments: true,
            monochrome: false,
        }
    }
}

/// Lightweight SVG cleanup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgProcessor {
    options: SvgOptions,
}

impl SvgProcessor {
    pub fn new(options: SvgOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SvgOptions {
        self.options
    }

    fn process_text(&self, text: &str) -> String {
        let mut out = text.trim().to_string();

        if self.options.strip_comments {
            out = COMMENT.replace_all(&out, "").into_owned();
            out = BETWEEN_TAGS.replace_all(&out, "><").into_owned();
        }

        if self.options.monochrome {
            out = PAINT
                .replace_all(&out, |caps: &regex::Captures<'_>| {
                    let value = &caps[2];
                    if value == "none" || value.starts_with("url(") {
                        caps[0].to_string()
                    } else {
                        format!("{}=\"currentColor\"", &caps[1])
                    }
                })
                .into_owned();
        }

        out
    }
}

impl ContentProcessor for SvgProcessor {
    fn process(&self, item: &RemoteItem, content: Vec<u8>) -> Result<Vec<u8>> {
        let text = String::from_utf8(content).map_err(|e| Error::InvalidContent {
            id: item.identifier.clone(),
            message: e.to_string(),
        })?;
        Ok(self.process_text(&text).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item() -> RemoteItem {
        RemoteItem {
            identifier: "1:1".into(),
            name: "logo".into(),
            content_hash: "sha256:00".into(),
        }
    }

    #[test]
    fn strips_comments_and_whitespace() {
        let processor = SvgProcessor::new(SvgOptions::default());
        let out = processor
            .process(&item(), b"<svg>\n  <!-- exported -->\n  <path d=\"M0\"/>\n</svg>\n".to_vec())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<svg><path d=\"M0\"/></svg>");
    }

    #[test]
    fn monochrome_rewrites_paints_but_keeps_none() {
        let processor = SvgProcessor::new(SvgOptions {
            strip_comments: false,
            monochrome: true,
        });
        let out = processor
            .process(
                &item(),
                br##"<svg fill="none"><path fill="#FF0000" stroke="#000"/><rect fill="url(#g)"/></svg>"##.to_vec(),
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r##"<svg fill="none"><path fill="currentColor" stroke="currentColor"/><rect fill="url(#g)"/></svg>"##
        );
    }

    #[test]
    fn non_utf8_is_invalid_content() {
        let processor = SvgProcessor::new(SvgOptions::default());
        let err = processor.process(&item(), vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::InvalidContent { ref id, .. } if id == "1:1"));
    }

    #[test]
    fn passthrough_is_identity() {
        let out = Passthrough.process(&item(), vec![0xff, 0x00]).unwrap();
        assert_eq!(out, vec![0xff, 0x00]);
    }
}
