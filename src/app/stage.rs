use std::sync::Arc;

use leptos::prelude::*;

use crate::config::VideoConfig;
use crate::scene::{badge_abbreviation, ComposedFrame, Composition, ElementKind, Style};

/// Canvas pixels as container-query units, so the canvas scales with its box.
fn canvas_len(px: f64, canvas_width: f64) -> String {
    format!("{:.4}cqw", px * 100.0 / canvas_width)
}

fn layer_css(style: &Style, canvas_width: f64) -> String {
    format!(
        "opacity: {:.4}; transform: {}; transform-origin: center;",
        style.opacity,
        style.transform_with(|px| canvas_len(px, canvas_width))
    )
}

/// Inline styles of one composed frame, flattened in layer order.
#[derive(Debug, Clone, PartialEq, Default)]
struct FrameStyles {
    root: String,
    layers: Vec<String>,
    elements: Vec<String>,
}

impl FrameStyles {
    fn new(frame: &ComposedFrame<'_>, canvas_width: f64) -> Self {
        let len = move |px: f64| canvas_len(px, canvas_width);
        Self {
            root: layer_css(&frame.root, canvas_width),
            layers: frame
                .layers
                .iter()
                .map(|l| layer_css(&l.style, canvas_width))
                .collect(),
            elements: frame
                .layers
                .iter()
                .flat_map(|l| l.elements.iter())
                .map(|e| {
                    format!(
                        "left: {}; top: {}; opacity: {:.4}; transform: translate(-50%, -50%) {};",
                        len(e.x),
                        len(e.y),
                        e.style.opacity,
                        e.style.transform_with(len)
                    )
                })
                .collect(),
        }
    }
}

fn element_view(kind: &ElementKind, config: &VideoConfig) -> AnyView {
    let canvas_width = f64::from(config.width.max(1));
    let len = move |px: f64| canvas_len(px, canvas_width);
    match kind {
        ElementKind::Background { css } => {
            let style = format!(
                "width: 100cqw; height: {}; background: {css};",
                len(f64::from(config.height))
            );
            view! { <div style=style /> }.into_any()
        }
        ElementKind::Glyph {
            ch,
            font_size,
            weight,
            color,
        } => {
            let style = format!(
                "display: block; font-size: {}; font-weight: {weight}; color: {color}; line-height: 1;",
                len(*font_size)
            );
            view! { <span style=style>{ch.to_string()}</span> }.into_any()
        }
        ElementKind::Text {
            content,
            font_size,
            weight,
            color,
            letter_spacing,
        } => {
            let style = format!(
                "display: block; white-space: nowrap; font-size: {}; font-weight: {weight}; color: {color}; letter-spacing: {letter_spacing}em;",
                len(*font_size)
            );
            view! { <span style=style>{content.clone()}</span> }.into_any()
        }
        ElementKind::Badge {
            label,
            color,
            diameter,
        } => {
            let abbreviation = badge_abbreviation(label);
            let circle = format!(
                "width: {d}; height: {d}; background: {color}; font-size: {};",
                len(diameter * 0.3),
                d = len(*diameter)
            );
            let caption = format!("font-size: {};", len(16.0));
            view! {
                <div class="flex flex-col items-center gap-2">
                    <div
                        class="flex items-center justify-center rounded-full font-bold text-white shadow-lg"
                        style=circle
                    >
                        {abbreviation}
                    </div>
                    <span class="text-foreground whitespace-nowrap" style=caption>
                        {label.clone()}
                    </span>
                </div>
            }
            .into_any()
        }
        ElementKind::Pill {
            label,
            color,
            font_size,
        } => {
            let style = format!(
                "font-size: {}; padding: {} {}; border: {} solid {color}; color: {color}; background: {color}33;",
                len(*font_size),
                len(font_size * 0.4),
                len(font_size),
                len(2.0)
            );
            view! {
                <span class="block rounded-full whitespace-nowrap font-medium" style=style>
                    {label.clone()}
                </span>
            }
            .into_any()
        }
        ElementKind::Panel {
            width,
            height,
            fill,
            accent,
        } => {
            let style = format!(
                "width: {}; height: {}; background: {fill}; border-top: {} solid {accent}; border-radius: {};",
                len(*width),
                len(*height),
                len(8.0),
                len(24.0)
            );
            view! { <div class="shadow-2xl" style=style /> }.into_any()
        }
        ElementKind::Dot { diameter, color } => {
            let style = format!(
                "width: {d}; height: {d}; background: {color};",
                d = len(*diameter)
            );
            view! { <div class="rounded-full" style=style /> }.into_any()
        }
        ElementKind::Icon {
            symbol,
            size,
            color,
        } => {
            let style = format!("display: block; font-size: {}; color: {color};", len(*size));
            view! { <span style=style>{*symbol}</span> }.into_any()
        }
    }
}

/// Renders `composition` at the current value of `frame`.
///
/// The element tree is built once; each frame only rewrites inline styles.
#[component]
pub fn Stage(composition: Arc<Composition>, #[prop(into)] frame: Signal<u32>) -> impl IntoView {
    let config = composition.config;
    let canvas_width = f64::from(config.width.max(1));
    let styles = Memo::new({
        let composition = Arc::clone(&composition);
        move |_| FrameStyles::new(&composition.compose(frame.get()), canvas_width)
    });

    let mut next_element = 0;
    let mut layers = Vec::with_capacity(composition.layers.len());
    for (layer_index, layer) in composition.layers.iter().enumerate() {
        let mut elements = Vec::with_capacity(layer.elements.len());
        for element in &layer.elements {
            let index = next_element;
            next_element += 1;
            elements.push(view! {
                <div
                    class="absolute"
                    data-element=element.id.clone()
                    style=move || styles.with(|s| s.elements.get(index).cloned().unwrap_or_default())
                >
                    {element_view(&element.kind, &config)}
                </div>
            });
        }
        layers.push(view! {
            <div
                class="absolute inset-0"
                data-layer=layer.id.clone()
                style=move || styles.with(|s| s.layers.get(layer_index).cloned().unwrap_or_default())
            >
                {elements}
            </div>
        });
    }

    let frame_box = format!(
        "aspect-ratio: {} / {}; container-type: inline-size;",
        config.width, config.height
    );

    view! {
        <div class="stage relative w-full overflow-hidden" style=frame_box>
            <div class="absolute inset-0" style=move || styles.with(|s| s.root.clone())>
                {layers}
            </div>
        </div>
    }
}
