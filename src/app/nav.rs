use leptos::{html, prelude::*};
use leptos_use::use_window_scroll;

use crate::sections::{active_section, Section, SectionBounds};

/// One node ref per page section, in page order.
pub type SectionRefs = [(Section, NodeRef<html::Section>); 5];

pub fn section_refs() -> SectionRefs {
    Section::ALL.map(|s| (s, NodeRef::new()))
}

pub fn node_for(refs: &SectionRefs, section: Section) -> Option<NodeRef<html::Section>> {
    refs.iter()
        .find(|(s, _)| *s == section)
        .map(|(_, node)| *node)
}

fn measure(refs: &SectionRefs) -> Vec<SectionBounds> {
    refs.iter()
        .filter_map(|(section, node)| {
            let el = node.get_untracked()?;
            Some(SectionBounds {
                section: *section,
                top: f64::from(el.offset_top()),
                height: f64::from(el.offset_height()),
            })
        })
        .collect()
}

pub fn scroll_to(refs: &SectionRefs, section: Section) {
    if let Some(el) = node_for(refs, section).and_then(|node| node.get_untracked()) {
        el.scroll_into_view();
    }
}

#[component]
pub fn Nav(owner: String, refs: SectionRefs) -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    let (menu_open, set_menu_open) = signal(false);
    let active = Memo::new(move |_| {
        active_section(scroll_y.get(), &measure(&refs)).unwrap_or(Section::Home)
    });

    let link = move |section: Section| {
        view! {
            <button
                class=move || {
                    if active.get() == section {
                        "px-3 py-2 text-primary font-medium transition-colors duration-200"
                    } else {
                        "px-3 py-2 text-muted hover:text-foreground transition-colors duration-200"
                    }
                }
                on:click=move |_| {
                    set_menu_open.set(false);
                    scroll_to(&refs, section);
                }
            >
                {section.label()}
            </button>
        }
    };

    view! {
        <nav class="fixed top-0 inset-x-0 z-40 bg-background/80 backdrop-blur border-b border-muted/20">
            <div class="max-w-6xl mx-auto px-4 flex items-center justify-between h-16">
                <button
                    class="text-xl font-bold text-foreground"
                    on:click=move |_| scroll_to(&refs, Section::Home)
                >
                    {owner}
                </button>
                <div class="hidden md:flex items-center gap-2">
                    {Section::ALL.into_iter().map(link).collect_view()}
                </div>
                <button
                    class="md:hidden text-2xl text-muted"
                    aria-label="Toggle menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>
            <Show when=move || menu_open.get()>
                <div class="md:hidden flex flex-col px-4 pb-4 bg-background/95">
                    {Section::ALL.into_iter().map(link).collect_view()}
                </div>
            </Show>
        </nav>
    }
}
