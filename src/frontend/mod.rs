mod chrome;
mod dom;
mod effects;
mod fireworks;
mod listing;
mod theme;

use std::cell::RefCell;

use gloo_events::EventListener;
use web_sys::Element;

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::SiteResult;

/// Everything wired at load. Dropping it would unregister the listeners, so
/// it lives in a thread-local for the lifetime of the page.
#[derive(Default)]
struct Site {
    theme_toggle: Option<theme::ThemeToggle>,
    menu_toggle: Option<chrome::MenuToggle>,
    transitions: Option<chrome::PageTransitions>,
    scroll: Option<chrome::ScrollIndicators>,
    reveal: Option<effects::RevealAnimator>,
    listeners: Vec<EventListener>,
    photo_filters: Option<listing::PhotoFilters>,
    projects: Option<listing::ProjectsPage>,
    photos: Option<listing::PhotosPage>,
    fireworks: Option<fireworks::FireworksEgg>,
}

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

fn read_config() -> (SiteConfig, Option<String>) {
    let raw = dom::by_id::<Element>(CONFIG_ELEMENT_ID).and_then(|element| element.text_content());
    let Some(raw) = raw else {
        return (SiteConfig::default(), None);
    };

    match SiteConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(error) => (SiteConfig::default(), Some(error.to_string())),
    }
}

/// Logs and discards a failed optional feature.
fn optional<T>(feature: &str, result: SiteResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            log::warn!("{feature}: disabled ({error})");
            None
        }
    }
}

pub fn run() {
    chrome::mark_scripted();
    console_error_panic_hook::set_once();

    let (config, config_error) = read_config();
    let _ = console_log::init_with_level(config.log_level.to_level());
    if let Some(error) = config_error {
        log::warn!("{error}; using defaults");
    }

    let theme = theme::init_theme();
    chrome::fill_footer_year();
    chrome::highlight_nav();
    chrome::make_main_focusable();

    let reduced_motion = dom::prefers_reduced_motion();
    let mut site = Site {
        theme_toggle: theme::ThemeToggle::attach(theme),
        menu_toggle: chrome::MenuToggle::attach(),
        transitions: optional("transitions", chrome::PageTransitions::attach(&config)),
        scroll: optional("scroll indicators", chrome::ScrollIndicators::attach(&config)),
        reveal: Some(effects::RevealAnimator::attach(reduced_motion)),
        ..Site::default()
    };

    site.listeners.extend(optional("ripples", effects::attach_ripples()));
    effects::attach_tilt(&config, &mut site.listeners);
    effects::attach_magnetic(&config, &mut site.listeners);
    site.listeners.extend(effects::attach_parallax(reduced_motion));

    site.photo_filters = listing::PhotoFilters::attach();
    site.projects = listing::ProjectsPage::attach();
    site.photos = listing::PhotosPage::attach();
    site.fireworks = optional("fireworks", fireworks::FireworksEgg::attach(&config.fireworks));

    log::info!(
        "site: ready ({} listeners, projects: {}, photos: {})",
        site.listeners.len(),
        site.projects.is_some(),
        site.photos.is_some()
    );
    SITE.with(|cell| *cell.borrow_mut() = Some(site));
}
