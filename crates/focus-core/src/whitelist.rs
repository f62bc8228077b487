//! Whitelist normalization and membership
//!
//! Process names and website domains are compared case-insensitively.
//! Malformed input never fails; it degrades to a best-effort key.

use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Canonical form of a process name: a trailing `.exe` (any case) is removed
pub fn normalize_process(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".exe") {
        &name[..len - 4]
    } else {
        name
    }
}

/// Canonical form of a website: the hostname of `value` read as a URL.
///
/// Bare hosts such as `github.com/rust-lang` are read as `https://` URLs.
/// Anything that still does not parse falls back to the lower-cased input.
/// Blank input yields an empty string.
pub fn normalize_domain(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Some(host) = host_of(raw) {
        return host;
    }

    if let Some(host) = host_of(&format!("https://{}", raw)) {
        return host;
    }

    debug!(value = %raw, "Domain did not parse as a URL, using it verbatim");
    raw.to_lowercase()
}

fn host_of(candidate: &str) -> Option<String> {
    let url = Url::parse(candidate).ok()?;
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_lowercase)
}

/// True if `domain` is an entry of `allowed` or a subdomain of one
pub fn domain_allowed<'a, I>(domain: &str, allowed: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let domain = domain.to_lowercase();
    allowed.into_iter().any(|entry| {
        let entry = entry.to_lowercase();
        domain == entry || domain.ends_with(&format!(".{}", entry))
    })
}

/// Set of permitted foreground processes
#[derive(Debug, Clone, Default)]
pub struct ProcessWhitelist {
    keys: HashSet<String>,
    /// Normalized names in first-seen order, for the history note
    labels: Vec<String>,
}

impl ProcessWhitelist {
    pub fn new<I, S>(processes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for process in processes {
            let name = normalize_process(process.as_ref());
            if list.keys.insert(name.to_lowercase()) {
                list.labels.push(name.to_string());
            }
        }
        list
    }

    /// Whether a sampled process name is permitted
    pub fn contains(&self, process: &str) -> bool {
        self.keys.contains(&normalize_process(process).to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries joined with `", "`, empty when there are none
    pub fn note(&self) -> String {
        self.labels.join(", ")
    }
}

/// Set of permitted website domains
#[derive(Debug, Clone, Default)]
pub struct DomainWhitelist {
    entries: Vec<String>,
}

impl DomainWhitelist {
    pub fn new<I, S>(websites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = Vec::new();
        for site in websites {
            let key = normalize_domain(site.as_ref());
            if !key.is_empty() && !entries.contains(&key) {
                entries.push(key);
            }
        }
        Self { entries }
    }

    pub fn allows(&self, domain: &str) -> bool {
        domain_allowed(domain, self.entries.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// An empty list disables website enforcement entirely
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_process() {
        assert_eq!(normalize_process("chrome.exe"), "chrome");
        assert_eq!(normalize_process("Notepad.EXE"), "Notepad");
        assert_eq!(normalize_process("code"), "code");
        assert_eq!(normalize_process(".exe"), "");
        assert_eq!(normalize_process("exe"), "exe");
        assert_eq!(normalize_process("firefox.exe.bak"), "firefox.exe.bak");
    }

    #[test]
    fn test_normalize_process_multibyte() {
        assert_eq!(normalize_process("编辑器"), "编辑器");
        assert_eq!(normalize_process("编辑器.exe"), "编辑器");
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://GitHub.com/rust-lang/rust"), "github.com");
        assert_eq!(normalize_domain("docs.rs"), "docs.rs");
        assert_eq!(normalize_domain("  docs.rs/tokio  "), "docs.rs");
        assert_eq!(normalize_domain("http://localhost:8080/x"), "localhost");
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("   "), "");
    }

    #[test]
    fn test_normalize_domain_fallback() {
        assert_eq!(normalize_domain("Not A Host"), "not a host");
    }

    #[test]
    fn test_domain_allowed() {
        let allowed = ["github.com", "docs.rs"];
        assert!(domain_allowed("github.com", allowed));
        assert!(domain_allowed("gist.github.com", allowed));
        assert!(domain_allowed("GIST.GitHub.com", allowed));
        assert!(!domain_allowed("notgithub.com", allowed));
        assert!(!domain_allowed("github.com.evil.io", allowed));
        assert!(!domain_allowed("youtube.com", allowed));
    }

    #[test]
    fn test_process_whitelist() {
        let list = ProcessWhitelist::new(["chrome.exe", "Code", "CHROME"]);
        assert_eq!(list.len(), 2);
        assert!(list.contains("chrome"));
        assert!(list.contains("Chrome.exe"));
        assert!(list.contains("code.EXE"));
        assert!(!list.contains("notepad.exe"));
        assert_eq!(list.note(), "chrome, Code");
    }

    #[test]
    fn test_empty_process_whitelist_note() {
        let list = ProcessWhitelist::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert_eq!(list.note(), "");
    }

    #[test]
    fn test_domain_whitelist_skips_blank_entries() {
        let list = DomainWhitelist::new(["https://github.com/", " ", "", "GitHub.com"]);
        assert_eq!(list.len(), 1);
        assert!(list.allows("api.github.com"));
    }
}
