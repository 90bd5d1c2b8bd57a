//! Active-link matching and the rules for which link clicks get the fade-out
//! page transition.

use url::Url;

pub const DEFAULT_PAGE: &str = "index.html";

/// Lowercased last path segment, `index.html` for directory paths.
pub fn current_page(pathname: &str) -> String {
    let last = pathname.rsplit('/').next().unwrap_or_default();
    if last.is_empty() {
        DEFAULT_PAGE.to_string()
    } else {
        last.to_lowercase()
    }
}

pub fn is_active_link(href: &str, page: &str) -> bool {
    let href = href.to_lowercase();
    !href.is_empty() && !page.is_empty() && href.contains(page)
}

/// What the click handler knows about the anchor and the click itself.
#[derive(Clone, Debug, Default)]
pub struct LinkClick<'a> {
    pub href: &'a str,
    pub target: Option<&'a str>,
    pub download: bool,
    pub modified: bool,
    pub default_prevented: bool,
}

pub fn is_same_origin(href: &str, page_url: &Url) -> bool {
    page_url
        .join(href)
        .map(|resolved| resolved.origin() == page_url.origin())
        .unwrap_or(false)
}

/// True when the click should be swallowed and replaced by the fade-out
/// followed by a delayed navigation.
pub fn should_intercept(click: &LinkClick<'_>, page_url: &Url) -> bool {
    if click.default_prevented || click.modified || click.download {
        return false;
    }

    let href = click.href;
    if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("tel:") {
        return false;
    }

    let target = click.target.map(str::to_lowercase).unwrap_or_default();
    if !target.is_empty() && target != "_self" {
        return false;
    }

    is_same_origin(href, page_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://karan.example/projects.html").expect("valid URL")
    }

    fn click(href: &str) -> LinkClick<'_> {
        LinkClick {
            href,
            ..LinkClick::default()
        }
    }

    #[test]
    fn current_page_defaults_to_index() {
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page(""), "index.html");
        assert_eq!(current_page("/site/Photos.HTML"), "photos.html");
    }

    #[test]
    fn active_link_matches_by_containment() {
        assert!(is_active_link("Projects.html", "projects.html"));
        assert!(is_active_link("./projects.html#top", "projects.html"));
        assert!(!is_active_link("photos.html", "projects.html"));
        assert!(!is_active_link("", "projects.html"));
    }

    #[test]
    fn relative_links_are_intercepted() {
        assert!(should_intercept(&click("photos.html"), &page()));
        assert!(should_intercept(&click("/"), &page()));
        assert!(should_intercept(&click("https://karan.example/about.html"), &page()));
    }

    #[test]
    fn external_and_special_links_pass_through() {
        assert!(!should_intercept(&click("https://github.com/karan"), &page()));
        assert!(!should_intercept(&click("#contact"), &page()));
        assert!(!should_intercept(&click("mailto:hi@karan.example"), &page()));
        assert!(!should_intercept(&click("tel:+15555550100"), &page()));
        assert!(!should_intercept(&click("http://karan.example/about.html"), &page()));
    }

    #[test]
    fn target_download_and_modifiers_pass_through() {
        let new_tab = LinkClick {
            target: Some("_blank"),
            ..click("photos.html")
        };
        let same_tab = LinkClick {
            target: Some("_SELF"),
            ..click("photos.html")
        };
        let download = LinkClick {
            download: true,
            ..click("resume.pdf")
        };
        let ctrl_click = LinkClick {
            modified: true,
            ..click("photos.html")
        };
        let handled = LinkClick {
            default_prevented: true,
            ..click("photos.html")
        };

        assert!(!should_intercept(&new_tab, &page()));
        assert!(should_intercept(&same_tab, &page()));
        assert!(!should_intercept(&download, &page()));
        assert!(!should_intercept(&ctrl_click, &page()));
        assert!(!should_intercept(&handled, &page()));
    }
}
