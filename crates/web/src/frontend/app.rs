//! Leptos page: header, filters, ranking cards, buying guide, details modal.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use glovehub_catalog::{
    t, BrowserConfig, CardTrigger, CardView, CatalogStore, Frame, Key, Label, Lang, ListRegion,
    Navigation, ProductId, UserAction,
};

use crate::frontend::api::{self, HttpSource, RevealObserver, RANKINGS_SECTION};
use crate::session::{bundled_config, Session};

/// Handle shared by every component: the session plus the published frame.
#[derive(Clone)]
struct Browser {
    session: Rc<Session>,
    frame: RwSignal<Option<Frame>>,
}

impl Browser {
    fn new(config: BrowserConfig) -> Self {
        Self {
            session: Rc::new(Session::new(config)),
            frame: create_rw_signal(None),
        }
    }

    /// Kick off the one catalog fetch.
    fn load(&self) {
        let browser = self.clone();
        let source = HttpSource::new(self.session.config().data_url.clone());
        spawn_local(async move {
            let catalog = CatalogStore::new(source).load_or_empty().await;
            if let Some(frame) = browser.session.install(catalog) {
                browser.frame.set(Some(frame));
            }
        });
    }

    fn dispatch(&self, action: UserAction) {
        // The session borrow ends inside `dispatch`; publishing afterwards
        // keeps reactive effects from re-entering it.
        let Some(update) = self.session.dispatch(action) else {
            return;
        };
        self.frame.set(Some(update.frame));
        if let Some(navigation) = update.navigation {
            api::navigate(navigation);
        }
    }

    /// Read one field of this card from the current frame.
    fn card_field<T: Default>(
        &self,
        id: ProductId,
        read: impl Fn(&CardView) -> T + 'static,
    ) -> impl Fn() -> T + 'static {
        let frame = self.frame;
        move || {
            frame.with(|f| {
                f.as_ref()
                    .and_then(|f| f.card(id))
                    .map(&read)
                    .unwrap_or_default()
            })
        }
    }

    fn label(&self, label: Label) -> impl Fn() -> &'static str + Copy + 'static {
        let frame = self.frame;
        move || {
            frame.with(|f| match f {
                Some(f) => f.labels.get(label),
                None => t(label, Lang::En),
            })
        }
    }
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let browser = Browser::new(bundled_config());
    browser.load();

    let escape = browser.clone();
    let _ = window_event_listener(ev::keydown, move |ev| {
        if let Key::Escape = Key::from_dom(&ev.key()) {
            escape.dispatch(UserAction::KeyPressed(Key::Escape));
        }
    });

    view! {
        <div class="app">
            <SiteHeader browser=browser.clone()/>
            <main>
                <Hero browser=browser.clone()/>
                <Rankings browser=browser.clone()/>
                <Guide browser=browser.clone()/>
            </main>
            <DetailsModal browser=browser/>
        </div>
    }
}

/// Sticky header with position shortcuts and the language toggle.
#[component]
fn SiteHeader(browser: Browser) -> impl IntoView {
    let scrolled = create_rw_signal(false);
    let _ = window_event_listener(ev::scroll, move |_| {
        let y = window().scroll_y().unwrap_or(0.0);
        scrolled.set(y > 0.0);
    });

    let frame = browser.frame;
    let shortcuts = move || {
        frame.with(|f| {
            f.as_ref()
                .map(|f| {
                    f.controls
                        .categories
                        .iter()
                        .filter(|o| !o.value.is_empty())
                        .map(|o| o.value.clone())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let nav_browser = browser.clone();
    let toggle_browser = browser.clone();
    let toggle_label = browser.label(Label::LanguageToggle);

    view! {
        <header id="header" class:scrolled=move || scrolled.get()>
            <h1>"Glovehub"</h1>
            <nav class="nav-positions">
                <For
                    each=shortcuts
                    key=|position| position.clone()
                    children=move |position| {
                        let browser = nav_browser.clone();
                        let target = position.clone();
                        view! {
                            <a
                                href=format!("#{RANKINGS_SECTION}")
                                data-position=position.clone()
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    browser.dispatch(UserAction::JumpToCategory(target.clone()));
                                }
                            >
                                {position}
                            </a>
                        }
                    }
                />
            </nav>
            <button
                id="lang-toggle"
                on:click=move |_| toggle_browser.dispatch(UserAction::ToggleLanguage)
            >
                <span class="lang-label">{toggle_label}</span>
            </button>
        </header>
    }
}

/// Intro banner with the call to action.
#[component]
fn Hero(browser: Browser) -> impl IntoView {
    let explore = browser.label(Label::Explore);
    view! {
        <section id="hero" class="hero">
            <button
                id="cta-explore"
                class="btn btn-primary"
                on:click=|_| api::navigate(Navigation::ScrollToRankings)
            >
                {explore}
            </button>
        </section>
    }
}

/// Filters, item count, and the card list.
#[component]
fn Rankings(browser: Browser) -> impl IntoView {
    let frame = browser.frame;

    let count_label = move || {
        frame.with(|f| f.as_ref().map(|f| f.count_label.clone()).unwrap_or_default())
    };
    let empty_message = move || {
        frame.with(|f| match f.as_ref().map(|f| &f.list) {
            Some(ListRegion::Empty { message }) => Some(*message),
            _ => None,
        })
    };
    let cards = move || {
        frame.with(|f| f.as_ref().map(|f| f.cards().to_vec()).unwrap_or_default())
    };

    let card_browser = browser.clone();

    view! {
        <section id=RANKINGS_SECTION>
            <Filters browser=browser.clone()/>
            <p id="item-count">{count_label}</p>
            <div id="rankings-list">
                {move || empty_message().map(|message| view! {
                    <p class="empty-state">{message}</p>
                })}
                <For
                    each=cards
                    key=|card| card.id
                    children=move |card| view! { <Card card=card browser=card_browser.clone()/> }
                />
            </div>
        </section>
    }
}

/// Category select and tag pills, kept in step with the filter state.
#[component]
fn Filters(browser: Browser) -> impl IntoView {
    let frame = browser.frame;

    let categories = move || {
        frame.with(|f| {
            f.as_ref()
                .map(|f| f.controls.categories.clone())
                .unwrap_or_default()
        })
    };
    let selected = move || {
        frame.with(|f| {
            f.as_ref()
                .and_then(|f| f.controls.selected_category().map(str::to_string))
                .unwrap_or_default()
        })
    };
    let tags = move || {
        frame.with(|f| f.as_ref().map(|f| f.controls.tags.clone()).unwrap_or_default())
    };

    let select_browser = browser.clone();
    let pill_browser = browser.clone();
    let position_label = browser.label(Label::PositionFilter);

    view! {
        <div class="filters">
            <label for="position-filter">{position_label}</label>
            <select
                id="position-filter"
                prop:value=selected
                on:change=move |ev| {
                    select_browser.dispatch(UserAction::SelectCategory(event_target_value(&ev)));
                }
            >
                {move || {
                    categories()
                        .into_iter()
                        .map(|option| view! {
                            <option value=option.value selected=option.selected>
                                {option.label}
                            </option>
                        })
                        .collect_view()
                }}
            </select>
            <div class="filter-pills">
                {move || {
                    tags()
                        .into_iter()
                        .map(|option| {
                            let browser = pill_browser.clone();
                            let tag = option.tag.clone();
                            view! {
                                <button
                                    class="filter-pill"
                                    class:active=option.active
                                    data-filter=option.tag.clone()
                                    on:click=move |_| browser.dispatch(UserAction::ToggleTag(tag.clone()))
                                >
                                    {option.tag}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// One ranking card. Hidden until the reveal observer fires.
///
/// Mounted once per product id while it stays in the list; reveal state,
/// stagger delay and labels follow the frame reactively.
#[component]
fn Card(card: CardView, browser: Browser) -> impl IntoView {
    let id = card.id;
    let node_ref = create_node_ref::<html::Div>();

    if !card.revealed {
        let observer: Rc<RefCell<Option<RevealObserver>>> = Rc::default();
        let observer_browser = browser.clone();
        let threshold = browser.session.config().reveal_threshold;
        let slot = Rc::clone(&observer);
        node_ref.on_load(move |el| {
            let visible = observer_browser.clone();
            match api::observe_reveal(&el, threshold, move || {
                visible.dispatch(UserAction::CardVisible(id));
            }) {
                Ok(handle) => *slot.borrow_mut() = Some(handle),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "reveal observer unavailable; showing card");
                    observer_browser.dispatch(UserAction::CardVisible(id));
                }
            }
        });
        on_cleanup(move || drop(observer.borrow_mut().take()));
    }

    let revealed = browser.card_field(id, |c| c.revealed);
    let delay = browser.card_field(id, |c| format!("{}ms", c.reveal_delay_ms));
    let details_label = browser.label(Label::ViewDetails);
    let buy_label = browser.label(Label::WhereToBuy);

    let image_browser = browser.clone();
    let details_browser = browser.clone();
    let buy_browser = browser.clone();

    let attributes = card
        .attributes
        .iter()
        .map(|attr| view! { <span class="attribute-chip">{attr.clone()}</span> })
        .collect_view();

    view! {
        <div
            class="ranking-card"
            class:revealed=revealed
            style:animation-delay=delay
            node_ref=node_ref
        >
            <div class="card-rank">{format!("#{}", card.rank)}</div>
            <div
                class="card-image"
                on:click=move |_| image_browser.dispatch(UserAction::ActivateCard {
                    product: id,
                    trigger: CardTrigger::Image,
                })
            >
                <img src=card.image.clone() alt=card.title.clone() loading="lazy"/>
            </div>
            <div class="card-body">
                <h3 class="card-title">{card.title.clone()}</h3>
                <p class="card-summary">{card.summary.clone()}</p>
                <p class="card-positions">{card.positions_text.clone()}</p>
                <div class="card-attributes">{attributes}</div>
                <div class="card-actions">
                    <button
                        class="btn-details btn-small"
                        on:click=move |_| details_browser.dispatch(UserAction::ActivateCard {
                            product: id,
                            trigger: CardTrigger::Details,
                        })
                    >
                        {details_label}
                    </button>
                    <a
                        href=card.buy_link.clone()
                        class="btn-buy btn-small"
                        target="_blank"
                        rel="noopener noreferrer"
                        on:click=move |ev| {
                            ev.prevent_default();
                            buy_browser.dispatch(UserAction::ActivateCard {
                                product: id,
                                trigger: CardTrigger::Purchase,
                            });
                        }
                    >
                        {buy_label}
                    </a>
                </div>
            </div>
        </div>
    }
}

/// "How to choose" accordion. Open state is purely local to the page.
#[component]
fn Guide(browser: Browser) -> impl IntoView {
    let heading = browser.label(Label::GuideHeading);
    let sections = Label::GUIDE_SECTIONS
        .iter()
        .map(|&section| {
            let open = create_rw_signal(false);
            let title = browser.label(section);
            view! {
                <div class="accordion-item" class:open=move || open.get()>
                    <button class="accordion-header" on:click=move |_| open.update(|o| *o = !*o)>
                        <span>{title}</span>
                        <span class="accordion-icon">{move || if open.get() { "−" } else { "+" }}</span>
                    </button>
                </div>
            }
        })
        .collect_view();

    view! {
        <section id="guide-section">
            <h2>{heading}</h2>
            <div class="accordion">{sections}</div>
        </section>
    }
}

/// Product details overlay.
#[component]
fn DetailsModal(browser: Browser) -> impl IntoView {
    let frame = browser.frame;
    let details = move || frame.with(|f| f.as_ref().and_then(|f| f.details.clone()));
    let is_open = move || frame.with(|f| f.as_ref().is_some_and(|f| f.details.is_some()));

    let backdrop_browser = browser.clone();
    let close_browser = browser.clone();

    view! {
        <div
            id="details-modal"
            class="modal"
            style:display=move || if is_open() { "flex" } else { "none" }
            on:click=move |_| backdrop_browser.dispatch(UserAction::CloseDetails)
        >
            <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                <button
                    class="modal-close"
                    on:click=move |_| close_browser.dispatch(UserAction::CloseDetails)
                >
                    "×"
                </button>
                <div id="modal-body">
                    {move || details().map(|d| {
                        let attributes = d
                            .attributes
                            .iter()
                            .map(|attr| view! { <span class="attribute-chip">{attr.clone()}</span> })
                            .collect_view();
                        view! {
                            <div class="modal-product-image">
                                <img src=d.image.clone() alt=d.title.clone()/>
                            </div>
                            <h2 class="modal-product-title">{d.title.clone()}</h2>
                            <p class="modal-product-positions">
                                <strong>{d.positions_label}</strong>
                                " "
                                {d.positions_text.clone()}
                            </p>
                            <div class="card-attributes">{attributes}</div>
                            <div class="modal-product-details" inner_html=d.details.clone()></div>
                            <a
                                href=d.buy_link.clone()
                                class="btn btn-primary"
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                {d.buy_label}
                            </a>
                        }
                    })}
                </div>
            </div>
        </div>
    }
}
