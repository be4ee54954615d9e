use std::sync::Arc;

use codee::string::JsonSerdeWasmCodec;
use leptos::prelude::*;
use leptos_use::{storage::use_local_storage, use_media_query};
use log::{error, warn};

use crate::compositions::intro_video;
use crate::content::site;
use crate::intro::{
    FlagError, IntroAction, IntroController, IntroEvent, IntroState, SeenFlagStore,
    INTRO_SEEN_KEY, REDUCED_MOTION_QUERY,
};
use crate::playback::{Player, PlayerEvent};
use crate::scene::Composition;
use crate::subscription::{ManualPreference, PreferenceSource, Subscription};

use super::stage::Stage;

/// The seen flag, kept in browser local storage.
#[derive(Clone, Copy)]
struct LocalFlagStore {
    seen: Signal<bool>,
    set_seen: WriteSignal<bool>,
}

impl SeenFlagStore for LocalFlagStore {
    fn has_seen(&self) -> bool {
        self.seen.get_untracked()
    }

    fn mark_seen(&self) -> Result<(), FlagError> {
        match self.set_seen.try_set(true) {
            None => Ok(()),
            Some(_) => Err(FlagError::Unavailable),
        }
    }
}

#[derive(Clone, Copy)]
struct Overlay {
    controller: StoredValue<Option<IntroController<LocalFlagStore>>>,
    player: StoredValue<Player>,
    interval: StoredValue<Option<IntervalHandle>>,
    dismiss_timer: StoredValue<Option<TimeoutHandle>>,
    set_visible: WriteSignal<bool>,
}

impl Overlay {
    fn dispatch(self, event: IntroEvent) {
        let Some((action, visible)) = self
            .controller
            .try_update_value(|c| c.as_mut().map(|c| (c.handle(event), c.is_visible())))
            .flatten()
        else {
            return;
        };
        self.set_visible.set(visible);

        match action {
            IntroAction::ScheduleDismiss(delay) => {
                match set_timeout_with_handle(
                    move || self.dispatch(IntroEvent::DismissTimerElapsed),
                    delay,
                ) {
                    Ok(handle) => self.dismiss_timer.set_value(Some(handle)),
                    Err(e) => {
                        warn!("couldn't schedule intro dismissal: {e:?}");
                        self.dispatch(IntroEvent::DismissTimerElapsed);
                    }
                }
            }
            IntroAction::Suspend => {
                self.player.update_value(Player::pause);
                self.clear_dismiss_timer();
            }
            IntroAction::Restart => self.player.update_value(|p| {
                p.stop();
                p.play();
            }),
            IntroAction::Close => self.stop_timers(),
            IntroAction::None => {}
        }
    }

    fn stop_timers(self) {
        if let Some(Some(handle)) = self.interval.try_update_value(Option::take) {
            handle.clear();
        }
        self.clear_dismiss_timer();
    }

    fn clear_dismiss_timer(self) {
        if let Some(Some(handle)) = self.dismiss_timer.try_update_value(Option::take) {
            handle.clear();
        }
    }
}

fn intro_composition() -> Option<Arc<Composition>> {
    let site = match site() {
        Ok(site) => site,
        Err(e) => {
            error!("intro disabled: {e}");
            return None;
        }
    };
    match intro_video(&site.owner, &site.role, site.video) {
        Ok(composition) => Some(Arc::new(composition)),
        Err(e) => {
            error!("intro disabled: {e}");
            None
        }
    }
}

/// Full-screen intro shown once per visitor.
#[component]
pub fn IntroOverlay() -> impl IntoView {
    let Some(composition) = intro_composition() else {
        return ().into_any();
    };

    let (seen, set_seen, _) = use_local_storage::<bool, JsonSerdeWasmCodec>(INTRO_SEEN_KEY);
    let reduced_motion = use_media_query(REDUCED_MOTION_QUERY);
    let (visible, set_visible) = signal(false);
    let (frame, set_frame) = signal(0u32);

    let player = StoredValue::new(Player::for_composition(&composition));
    let subscriptions = StoredValue::new(Vec::<Subscription>::new());
    let preference = ManualPreference::new(false);
    let overlay = Overlay {
        controller: StoredValue::new(None),
        player,
        interval: StoredValue::new(None),
        dismiss_timer: StoredValue::new(None),
        set_visible,
    };

    Effect::new({
        let preference = preference.clone();
        move |_| preference.set(reduced_motion.get())
    });

    // effects only run in the browser, so storage and media queries are real here
    Effect::watch(
        || (),
        move |_, _, _| {
            let store = LocalFlagStore { seen, set_seen };
            let controller = IntroController::mount(store, reduced_motion.get_untracked());
            let playing = controller.state() == IntroState::Playing;
            set_visible.set(controller.is_visible());
            overlay.controller.set_value(Some(controller));
            if !playing {
                return;
            }

            let player_events = player.with_value(|p| {
                p.subscribe(move |event| match event {
                    PlayerEvent::FrameChanged(f) => set_frame.set(*f),
                    PlayerEvent::Ended => overlay.dispatch(IntroEvent::PlaybackEnded),
                    _ => {}
                })
            });
            let preference_events =
                IntroController::<LocalFlagStore>::watch_preference(&preference, move |event| {
                    overlay.dispatch(event)
                });
            subscriptions.update_value(|s| s.extend([player_events, preference_events]));

            // a preference change between render and mount
            if preference.matches() != reduced_motion.get_untracked() {
                overlay.dispatch(IntroEvent::ReducedMotionChanged(
                    reduced_motion.get_untracked(),
                ));
            }

            player.update_value(Player::play);
            let period = player.with_value(Player::frame_duration);
            match set_interval_with_handle(move || player.update_value(Player::tick), period) {
                Ok(handle) => overlay.interval.set_value(Some(handle)),
                Err(e) => error!("couldn't start intro playback: {e:?}"),
            }
        },
        true,
    );

    on_cleanup(move || {
        overlay.stop_timers();
        subscriptions.try_update_value(Vec::clear);
    });

    view! {
        <Show when=move || visible.get()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-background"
                role="dialog"
                aria-modal="true"
                aria-label="Intro"
            >
                <div class="w-full max-w-[177.78vh]">
                    <Stage composition=Arc::clone(&composition) frame=frame />
                </div>
                <button
                    class="absolute top-6 right-6 px-4 py-2 rounded-full border border-muted/40 text-sm text-muted hover:text-foreground hover:border-foreground transition-colors duration-200"
                    aria-label="Skip intro"
                    on:click=move |_| overlay.dispatch(IntroEvent::Skip)
                >
                    "Skip Intro"
                </button>
                <button
                    class="absolute bottom-6 right-6 text-xs uppercase tracking-widest text-muted hover:text-foreground transition-colors duration-200"
                    aria-label="Skip intro"
                    on:click=move |_| overlay.dispatch(IntroEvent::Skip)
                >
                    "Explore"
                </button>
            </div>
        </Show>
    }
    .into_any()
}
