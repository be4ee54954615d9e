use std::sync::Arc;

use leptos::{either::Either, ev, prelude::*};
use leptos_meta::Title;
use leptos_router::{components::A, hooks::use_params_map};
use log::error;

use crate::compositions::{project_demo, DemoProps};
use crate::content::site;
use crate::playback::{PlaybackState, Player, PlayerEvent};
use crate::scene::Composition;
use crate::subscription::Subscription;

use super::stage::Stage;

fn demo_for(index: Option<usize>) -> Option<(String, Arc<Composition>)> {
    let site = site().ok()?;
    let project = site.project(index?)?;
    match project_demo(&DemoProps::from(project), site.video) {
        Ok(composition) => Some((project.title.clone(), Arc::new(composition))),
        Err(e) => {
            error!("couldn't build demo for {}: {e}", project.title);
            None
        }
    }
}

#[component]
pub fn DemoPage() -> impl IntoView {
    let params = use_params_map();
    let index = move || {
        params
            .read()
            .get("index")
            .and_then(|i| i.parse::<usize>().ok())
    };

    view! {
        {move || match demo_for(index()) {
            Some((title, composition)) => {
                Either::Left(view! { <DemoPlayer title composition /> })
            }
            None => {
                Either::Right(
                    view! {
                        <Title text="Demo not found" />
                        <div class="max-w-2xl mx-auto py-32 text-center">
                            <h1 class="text-2xl font-bold mb-4">"No such project"</h1>
                            <A href="/">"← Back to projects"</A>
                        </div>
                    },
                )
            }
        }}
    }
}

#[component]
fn DemoPlayer(title: String, composition: Arc<Composition>) -> impl IntoView {
    let last_frame = composition.last_frame();
    let player = StoredValue::new(Player::for_composition(&composition));
    let (frame, set_frame) = signal(0u32);
    let (state, set_state) = signal(PlaybackState::Paused);
    let (looping, set_looping) = signal(false);
    let interval = StoredValue::new(None::<IntervalHandle>);

    let events = player.with_value(|p| {
        p.subscribe(move |event| {
            if let PlayerEvent::FrameChanged(f) = event {
                set_frame.set(*f);
            }
        })
    });
    let subscription = StoredValue::new(Some::<Subscription>(events));
    // every control goes through here so the state signal never lags the player
    let control = move |f: fn(&mut Player)| {
        player.update_value(|p| {
            f(p);
            set_state.set(p.state());
        })
    };

    Effect::watch(
        || (),
        move |_, _, _| {
            control(Player::play);
            let period = player.with_value(Player::frame_duration);
            let tick = move || {
                player.update_value(|p| {
                    p.tick();
                    set_state.set(p.state());
                })
            };
            match set_interval_with_handle(tick, period) {
                Ok(handle) => interval.set_value(Some(handle)),
                Err(e) => error!("couldn't start demo playback: {e:?}"),
            }
        },
        true,
    );

    on_cleanup(move || {
        if let Some(Some(handle)) = interval.try_update_value(Option::take) {
            handle.clear();
        }
        subscription.try_update_value(Option::take);
    });

    let toggle_loop = move |_: ev::Event| {
        let next = !looping.get_untracked();
        player.update_value(|p| p.set_looping(next));
        set_looping.set(next);
    };
    let seek = move |e: ev::Event| {
        if let Ok(f) = event_target_value(&e).parse::<u32>() {
            player.update_value(|p| {
                p.pause();
                p.seek(f);
                set_state.set(p.state());
            });
        }
    };
    let fps = f64::from(composition.config.fps.max(1));

    view! {
        <Title text=title.clone() />
        <div class="w-full max-w-5xl mx-auto px-4 py-16">
            <A href="/#projects">"← Back to projects"</A>
            <h1 class="text-3xl font-bold my-6">{title}</h1>
            <div class="rounded-xl overflow-hidden border border-muted/30 shadow-2xl">
                <Stage composition frame=frame />
            </div>
            <div class="flex flex-wrap items-center gap-4 mt-4">
                <button
                    class="px-4 py-2 rounded-md bg-primary/20 hover:bg-primary/30 text-primary border border-primary/30 transition-all duration-200"
                    on:click=move |_| control(Player::toggle)
                >
                    {move || if state.get() == PlaybackState::Playing { "Pause" } else { "Play" }}
                </button>
                <button
                    class="px-4 py-2 rounded-md border border-muted/30 hover:border-foreground transition-all duration-200"
                    on:click=move |_| {
                        control(Player::stop);
                        control(Player::play);
                    }
                >
                    "Restart"
                </button>
                <label class="flex items-center gap-2 text-sm text-muted">
                    <input type="checkbox" prop:checked=looping on:change=toggle_loop />
                    "Loop"
                </label>
                <input
                    class="flex-1 min-w-48 accent-primary"
                    type="range"
                    min="0"
                    max=last_frame.to_string()
                    prop:value=move || frame.get().to_string()
                    on:input=seek
                />
                <span class="text-sm text-muted tabular-nums">
                    {move || {
                        let f = frame.get();
                        format!("{:.1}s / frame {f}", f64::from(f) / fps)
                    }}
                </span>
            </div>
        </div>
    }
}
