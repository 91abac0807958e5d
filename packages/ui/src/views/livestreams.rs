use dioxus::prelude::*;
use store::streams::{embed_url, AddChannel};
use store::StreamGrid;

use crate::icons::{FaPlus, FaTableColumns, FaXmark};
use crate::session::use_config;
use crate::toast::use_toaster;
use crate::Icon;

/// Twitch players, revealed one by one as each predecessor finishes loading.
#[component]
pub fn LivestreamsView() -> Element {
    let config = use_config();
    let toaster = use_toaster();
    let channels = config.streams.channels.clone();
    let mut grid = use_signal(move || StreamGrid::shuffled(&channels));
    let mut input = use_signal(String::new);

    let mut on_add = move |_: ()| match grid.write().add(&input()) {
        AddChannel::Added(name) => {
            input.set(String::new());
            toaster.success(format!("Streamer {name} added"));
        }
        AddChannel::Duplicate => toaster.warning("Streamer already in the list"),
        AddChannel::Empty => {}
    };
    let mut add_on_enter = on_add;

    let g = grid();
    let visible: Vec<String> = g.visible().into_iter().map(String::from).collect();
    let parent = config.streams.parent_domain.clone();

    rsx! {
        section {
            class: "livestreams",
            div {
                class: "livestream-toolbar",
                input {
                    r#type: "text",
                    placeholder: "Add a Twitch channel",
                    value: input(),
                    oninput: move |evt: FormEvent| input.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            add_on_enter(());
                        }
                    },
                }
                button {
                    class: "btn primary",
                    onclick: move |_| on_add(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add"
                }
                button {
                    class: "btn outline",
                    title: "Toggle columns",
                    onclick: move |_| grid.write().toggle_columns(),
                    Icon { icon: FaTableColumns, width: 12, height: 12 }
                    " {g.columns} col"
                }
            }

            div {
                class: if g.columns == 1 { "livestream-grid one" } else { "livestream-grid two" },
                for (index, channel) in visible.into_iter().enumerate() {
                    div {
                        key: "{channel}",
                        class: "livestream",
                        div {
                            class: "livestream-title",
                            span { "{channel}" }
                            if !g.is_loaded(&channel) {
                                span { class: "muted small", "loading..." }
                            }
                            button {
                                class: "icon-button",
                                title: "Remove",
                                onclick: {
                                    let channel = channel.clone();
                                    move |_| grid.write().remove(&channel)
                                },
                                Icon { icon: FaXmark, width: 10, height: 10 }
                            }
                        }
                        iframe {
                            src: embed_url(&channel, &parent, index),
                            allowfullscreen: true,
                            onload: {
                                let channel = channel.clone();
                                move |_| grid.write().mark_loaded(&channel)
                            },
                        }
                    }
                }
            }
        }
    }
}
