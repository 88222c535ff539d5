use std::{borrow::Cow, sync::LazyLock};

use memchr::{memchr, memmem};
use regex::Regex;

use crate::{stage::Stage, unicode::SEPARATOR};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[-_.?&~;+=/#0-9A-Za-z]{1,2076}").expect("URL pattern is valid")
});

static MAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_.0-9A-Za-z]{1,64}@[-_0-9A-Za-z]{1,255}[-_.0-9A-Za-z]{1,255}")
        .expect("mail pattern is valid")
});

/// Replaces every URL and then every e-mail address with one separator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StripUrls;

impl Stage for StripUrls {
    fn name(&self) -> &'static str {
        "strip_urls"
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> bool {
        let bytes = text.as_bytes();
        memmem::find(bytes, b"http").is_some() || memchr(b'@', bytes).is_some()
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let sep = SEPARATOR.to_string();
        let mut current = text;
        for re in [&*URL_RE, &*MAIL_RE] {
            let replaced = match re.replace_all(&current, sep.as_str()) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = replaced {
                current = Cow::Owned(s);
            }
        }
        current
    }
}
