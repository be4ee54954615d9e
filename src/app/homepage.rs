use leptos::{either::Either, html, prelude::*};
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_use::{use_mouse_in_element, UseMouseInElementReturn};

use crate::content::{copyright_year, site, Project, SiteContent, Skill, SkillIcon};
use crate::sections::Section;
use crate::tilt::{relative_position, tilt_style, RelativePosition, TiltOptions};

use super::nav::{node_for, scroll_to, section_refs, Nav, SectionRefs};

#[component]
pub fn HomePage() -> impl IntoView {
    match site() {
        Ok(site) => Either::Left(view! { <Portfolio site /> }),
        Err(e) => Either::Right(view! {
            <Title text="Unavailable" />
            <div class="max-w-2xl mx-auto py-32 text-center text-muted">
                "Site content couldn't be loaded: " {e.to_string()}
            </div>
        }),
    }
}

#[component]
fn Portfolio(site: &'static SiteContent) -> impl IntoView {
    let refs = section_refs();
    // every section is in `refs`, see `section_refs`
    let node = move |section: Section| node_for(&refs, section).unwrap_or_else(NodeRef::new);

    view! {
        <Title text=site.role.clone() />
        <Nav owner=site.owner.clone() refs />
        <Hero site refs anchor=node(Section::Home) />
        <section id=Section::About.id() node_ref=node(Section::About) class="section">
            <h2 class="section-title">"About Me"</h2>
            <div class="max-w-3xl mx-auto space-y-4 text-lg leading-relaxed text-muted">
                {site.about.iter().map(|p| view! { <p>{p.clone()}</p> }).collect_view()}
            </div>
        </section>
        <section id=Section::Skills.id() node_ref=node(Section::Skills) class="section">
            <h2 class="section-title">"Skills"</h2>
            <div class="grid sm:grid-cols-2 gap-6 max-w-4xl mx-auto">
                {site.skills.iter().map(|skill| view! { <SkillCard skill /> }).collect_view()}
            </div>
        </section>
        <section id=Section::Projects.id() node_ref=node(Section::Projects) class="section">
            <h2 class="section-title">"Projects"</h2>
            <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">
                {site
                    .projects
                    .iter()
                    .enumerate()
                    .map(|(index, project)| view! { <ProjectCard index project /> })
                    .collect_view()}
            </div>
        </section>
        <section id=Section::Contact.id() node_ref=node(Section::Contact) class="section">
            <h2 class="section-title">"Get In Touch"</h2>
            <div class="max-w-2xl mx-auto text-center">
                <p class="text-lg text-muted mb-8">{site.contact.pitch.clone()}</p>
                <div class="flex justify-center gap-6">
                    {site
                        .contact
                        .links
                        .iter()
                        .map(|link| {
                            view! {
                                <a
                                    href=link.href.clone()
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="text-3xl text-muted hover:text-primary transition-colors duration-200"
                                    aria-label=link.label.clone()
                                >
                                    <i class=link.icon.clone()></i>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
        <footer class="py-8 text-center text-sm text-muted border-t border-muted/20">
            {format!("© {} {}. All rights reserved.", copyright_year(), site.owner)}
        </footer>
    }
}

#[component]
fn Hero(
    site: &'static SiteContent,
    refs: SectionRefs,
    anchor: NodeRef<html::Section>,
) -> impl IntoView {
    view! {
        <section
            id=Section::Home.id()
            node_ref=anchor
            class="min-h-screen flex flex-col items-center justify-center text-center px-4 hero-gradient"
        >
            <h1 class="text-5xl md:text-7xl font-bold mb-4">{site.owner.clone()}</h1>
            <p class="text-xl md:text-2xl text-primary uppercase tracking-[0.2em] mb-6">
                {site.role.clone()}
            </p>
            <p class="max-w-2xl text-lg text-muted mb-10">{site.tagline.clone()}</p>
            <div class="flex flex-col sm:flex-row gap-4">
                <button
                    class="px-6 py-3 rounded-md bg-primary text-white font-medium hover:bg-primary/80 transition-all duration-200"
                    on:click=move |_| scroll_to(&refs, Section::Projects)
                >
                    "View My Work"
                </button>
                <button
                    class="px-6 py-3 rounded-md border border-muted/40 hover:border-foreground font-medium transition-all duration-200"
                    on:click=move |_| scroll_to(&refs, Section::Contact)
                >
                    "Get In Touch"
                </button>
            </div>
        </section>
    }
}

fn skill_symbol(icon: SkillIcon) -> &'static str {
    match icon {
        SkillIcon::Globe => "🌐",
        SkillIcon::Database => "🗄️",
        SkillIcon::Smartphone => "📱",
        SkillIcon::Code => "💻",
    }
}

#[component]
fn SkillCard(skill: &'static Skill) -> impl IntoView {
    view! {
        <div class="p-6 rounded-xl bg-surface border border-muted/20">
            <div class="flex items-center gap-3 mb-4">
                <span class="text-3xl">{skill_symbol(skill.icon)}</span>
                <h3 class="text-lg font-semibold">{skill.name.clone()}</h3>
            </div>
            <div class="w-full h-2 rounded-full bg-background">
                <div
                    class="h-2 rounded-full bg-gradient-to-r from-primary to-secondary"
                    style=format!("width: {}%;", skill.level)
                ></div>
            </div>
            <p class="mt-2 text-sm text-right text-muted">{format!("{}%", skill.level)}</p>
        </div>
    }
}

#[component]
fn ProjectCard(index: usize, project: &'static Project) -> impl IntoView {
    let card = NodeRef::<html::Div>::new();
    let UseMouseInElementReturn {
        element_x,
        element_y,
        element_width,
        element_height,
        is_outside,
        ..
    } = use_mouse_in_element(card);
    let options = TiltOptions::default();
    let tilt = move || {
        let position = if is_outside.get() {
            RelativePosition::default()
        } else {
            relative_position(
                element_x.get(),
                element_y.get(),
                element_width.get(),
                element_height.get(),
            )
        };
        tilt_style(position, options).to_css()
    };

    view! {
        <div
            node_ref=card
            class="flex flex-col p-6 rounded-xl bg-surface border border-muted/20 shadow-lg"
            style=tilt
        >
            <h3 class="text-xl font-semibold mb-3">{project.title.clone()}</h3>
            <p class="text-muted mb-4 flex-grow">{project.description.clone()}</p>
            <div class="flex flex-wrap gap-2 mb-6">
                {project
                    .tech
                    .iter()
                    .map(|t| {
                        view! {
                            <span class="px-3 py-1 text-xs rounded-full bg-primary/20 text-primary">
                                {t.trim().to_string()}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="flex items-center gap-4 text-sm">
                <a
                    href=project.github.clone()
                    target="_blank"
                    rel="noopener noreferrer"
                    class="text-muted hover:text-foreground"
                >
                    <i class="devicon-github-plain"></i>
                    " Code"
                </a>
                {project
                    .live
                    .clone()
                    .map(|live| {
                        view! {
                            <a
                                href=live
                                target="_blank"
                                rel="noopener noreferrer"
                                class="text-muted hover:text-foreground"
                            >
                                "↗ Live"
                            </a>
                        }
                    })}
                <A href=format!("/demo/{index}") attr:class="ml-auto text-primary hover:underline">
                    "▶ Watch demo"
                </A>
            </div>
        </div>
    }
}
