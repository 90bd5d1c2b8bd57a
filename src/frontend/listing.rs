//! DOM side of the Projects and Photos grids. Each controller attaches only
//! when its grid is on the page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{window, Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlSelectElement};

use super::dom;
use crate::listing::{
    filter_photos_by_category, filter_photos_by_query, filter_projects, photo_order,
    project_order, PhotoItem, PhotoSort, ProjectCard, ProjectSort, ALL_FILTER,
};

const ACTIVE_CHIP_CLASS: &str = "active";

fn set_shown(element: &HtmlElement, shown: bool) {
    if shown {
        dom::clear_style(element, "display");
    } else {
        dom::set_style(element, "display", "none");
    }
}

fn is_shown(element: &HtmlElement) -> bool {
    element
        .style()
        .get_property_value("display")
        .map(|value| value != "none")
        .unwrap_or(true)
}

fn activate_chip(chips: &[HtmlElement], active: &HtmlElement) {
    for chip in chips {
        let _ = chip.class_list().remove_1(ACTIVE_CHIP_CLASS);
    }
    let _ = active.class_list().add_1(ACTIVE_CHIP_CLASS);
}

fn chip_filter(chip: &HtmlElement) -> String {
    dom::data(chip, "filter").unwrap_or_else(|| ALL_FILTER.to_string())
}

fn child_text(parent: &Element, selector: &str) -> Option<String> {
    parent.query_selector(selector).ok().flatten()?.text_content()
}

/// Category chips above the photo grid on pages without the full photo
/// controller.
pub struct PhotoFilters {
    _clicks: Vec<EventListener>,
}

impl PhotoFilters {
    pub fn attach() -> Option<Self> {
        let wrap: Element = dom::query(".photo-filters")?;
        let chips: Rc<Vec<HtmlElement>> = Rc::new(dom::query_all_in(&wrap, ".chip"));
        let images: Rc<Vec<HtmlElement>> = Rc::new(dom::query_all(".photo-grid img"));

        let clicks = chips
            .iter()
            .map(|chip| {
                let chip_handle = chip.clone();
                let chips = Rc::clone(&chips);
                let images = Rc::clone(&images);
                EventListener::new(chip, "click", move |_| {
                    activate_chip(&chips, &chip_handle);

                    let items: Vec<PhotoItem> = images
                        .iter()
                        .map(|img| {
                            let category = dom::data(img, "category").unwrap_or_default();
                            PhotoItem::new("", "", &category, None)
                        })
                        .collect();
                    let filter = chip_filter(&chip_handle);
                    for (img, shown) in images.iter().zip(filter_photos_by_category(&items, &filter)) {
                        set_shown(img, shown);
                    }
                })
            })
            .collect();

        Some(Self { _clicks: clicks })
    }
}

struct ProjectsState {
    grid: Element,
    search: Option<HtmlInputElement>,
    sort: Option<HtmlSelectElement>,
    empty: Option<HtmlElement>,
    active: String,
}

impl ProjectsState {
    fn cards(&self) -> Vec<HtmlElement> {
        dom::query_all_in(&self.grid, ".card")
    }

    fn snapshot(card: &HtmlElement) -> ProjectCard {
        let title = dom::data(card, "title")
            .or_else(|| child_text(card, "h2"))
            .unwrap_or_default();
        let text = child_text(card, "p").unwrap_or_default();
        ProjectCard::new(
            &dom::data(card, "tags").unwrap_or_default(),
            &title,
            &text,
            dom::parse_date(dom::data(card, "date")),
        )
    }

    fn apply_filters(&self) {
        let cards = self.cards();
        let snapshots: Vec<ProjectCard> = cards.iter().map(Self::snapshot).collect();
        let query = self.search.as_ref().map(HtmlInputElement::value).unwrap_or_default();

        let visible = filter_projects(&snapshots, &self.active, &query);
        for (card, shown) in cards.iter().zip(&visible) {
            set_shown(card, *shown);
        }

        if let Some(empty) = self.empty.as_ref() {
            empty.set_hidden(visible.iter().any(|shown| *shown));
        }
    }

    fn apply_sort(&self) {
        let cards = self.cards();
        let snapshots: Vec<ProjectCard> = cards.iter().map(Self::snapshot).collect();
        let visible: Vec<bool> = cards.iter().map(is_shown).collect();
        let mode = self
            .sort
            .as_ref()
            .map(|sort| ProjectSort::from_str(&sort.value()))
            .unwrap_or_default();

        for index in project_order(&snapshots, &visible, mode) {
            let _ = self.grid.append_child(&cards[index]);
        }
    }

    fn refresh(&self) {
        self.apply_filters();
        self.apply_sort();
    }
}

/// Search, tag chips and sort for `#grid`.
pub struct ProjectsPage {
    _listeners: Vec<EventListener>,
}

impl ProjectsPage {
    pub fn attach() -> Option<Self> {
        let grid: Element = dom::by_id("grid")?;
        let state = Rc::new(RefCell::new(ProjectsState {
            grid,
            search: dom::by_id("search"),
            sort: dom::by_id("sort"),
            empty: dom::by_id("empty"),
            active: ALL_FILTER.to_string(),
        }));

        let chips: Rc<Vec<HtmlElement>> = Rc::new(dom::query_all(".chip"));
        let mut listeners: Vec<EventListener> = chips
            .iter()
            .map(|chip| {
                let chip_handle = chip.clone();
                let chips = Rc::clone(&chips);
                let state = Rc::clone(&state);
                EventListener::new(chip, "click", move |_| {
                    activate_chip(&chips, &chip_handle);
                    state.borrow_mut().active = chip_filter(&chip_handle);
                    state.borrow().refresh();
                })
            })
            .collect();

        if let Some(search) = state.borrow().search.as_ref() {
            let state = Rc::clone(&state);
            listeners.push(EventListener::new(search, "input", move |_| {
                state.borrow().refresh();
            }));
        }
        if let Some(sort) = state.borrow().sort.as_ref() {
            let state = Rc::clone(&state);
            listeners.push(EventListener::new(sort, "change", move |_| {
                state.borrow().apply_sort();
            }));
        }

        state.borrow().refresh();
        log::debug!("projects: {} cards", state.borrow().cards().len());
        Some(Self {
            _listeners: listeners,
        })
    }
}

struct PhotosState {
    grid: Element,
    images: Vec<HtmlImageElement>,
    search: Option<HtmlInputElement>,
    sort: Option<HtmlSelectElement>,
}

impl PhotosState {
    fn snapshots(&self) -> Vec<PhotoItem> {
        self.images
            .iter()
            .map(|img| {
                PhotoItem::new(
                    &dom::data(img, "title").unwrap_or_default(),
                    &dom::data(img, "tags").unwrap_or_default(),
                    &dom::data(img, "category").unwrap_or_default(),
                    dom::parse_date(dom::data(img, "date")),
                )
            })
            .collect()
    }

    fn filter(&self) {
        let query = self.search.as_ref().map(HtmlInputElement::value).unwrap_or_default();
        for (img, shown) in self.images.iter().zip(filter_photos_by_query(&self.snapshots(), &query)) {
            set_shown(img, shown);
        }
    }

    fn resort(&self) {
        let mode = self
            .sort
            .as_ref()
            .map(|sort| PhotoSort::from_str(&sort.value()))
            .unwrap_or_default();

        for index in photo_order(&self.snapshots(), mode) {
            let _ = self.grid.append_child(&self.images[index]);
        }
    }
}

/// Search, sort and open-in-new-tab for `#photoGrid`.
pub struct PhotosPage {
    _listeners: Vec<EventListener>,
}

impl PhotosPage {
    pub fn attach() -> Option<Self> {
        let grid: Element = dom::by_id("photoGrid")?;
        let images: Vec<HtmlImageElement> = dom::query_all_in(&grid, "img");
        let state = Rc::new(PhotosState {
            grid,
            images,
            search: dom::by_id("photoSearch"),
            sort: dom::by_id("photoSort"),
        });

        let mut listeners: Vec<EventListener> = state
            .images
            .iter()
            .map(|img| {
                let source = img.clone();
                EventListener::new(img, "click", move |_| {
                    if let Some(win) = window() {
                        let _ = win.open_with_url_and_target(&source.src(), "_blank");
                    }
                })
            })
            .collect();

        if let Some(search) = state.search.as_ref() {
            let state = Rc::clone(&state);
            listeners.push(EventListener::new(search, "input", move |_| state.filter()));
        }
        if let Some(sort) = state.sort.as_ref() {
            let state = Rc::clone(&state);
            listeners.push(EventListener::new(sort, "change", move |_| state.resort()));
        }

        state.filter();
        state.resort();
        log::debug!("photos: {} images", state.images.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}
