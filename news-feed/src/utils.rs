/// Text processing utilities
pub mod text {
    /// Collapse runs of whitespace (including non-breaking spaces) into single
    /// spaces and trim the ends.
    pub fn collapse_whitespace(text: &str) -> String {
        text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Remove list bullets and dashes that prefix a line of plain text.
    pub fn strip_bullets(text: &str) -> &str {
        text.trim_start_matches(|c: char| {
            c.is_whitespace() || matches!(c, '•' | '·' | '*' | '-' | '–' | '—' | '▪' | '‣')
        })
        .trim_end()
    }

    /// URL fragment slug: lowercase ASCII letters, digits and single dashes.
    pub fn slugify(text: &str) -> String {
        let mut slug = String::with_capacity(text.len());
        let mut pending_dash = false;

        for c in text.chars().flat_map(char::to_lowercase) {
            let mapped = match c {
                'å' | 'ä' | 'à' | 'á' | 'â' => Some('a'),
                'ö' | 'ø' | 'ó' | 'ò' | 'ô' => Some('o'),
                'é' | 'è' | 'ê' | 'ë' => Some('e'),
                'ü' | 'ú' => Some('u'),
                c if c.is_ascii_alphanumeric() => Some(c),
                _ => None,
            };

            match mapped {
                Some(c) => {
                    if pending_dash && !slug.is_empty() {
                        slug.push('-');
                    }
                    pending_dash = false;
                    slug.push(c);
                }
                None => pending_dash = true,
            }
        }

        slug
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Resolve `href` against `base`; absolute hrefs are returned as-is.
    pub fn resolve(base: &Url, href: &str) -> Option<String> {
        base.join(href.trim()).ok().map(|u| u.to_string())
    }

    /// Source URL with `fragment` replacing any existing fragment.
    pub fn with_fragment(base: &Url, fragment: &str) -> String {
        let mut url = base.clone();
        url.set_fragment(Some(fragment));
        url.to_string()
    }

    /// Validate page URL format
    pub fn is_http_url(url_str: &str) -> bool {
        if let Ok(url) = Url::parse(url_str) {
            url.scheme() == "http" || url.scheme() == "https"
        } else {
            false
        }
    }
}
