use concentration_core::{Coord2, GameConfig};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SizeSelectProps {
    pub current: Coord2,
    pub onselect: Callback<Coord2>,
}

pub(crate) fn size_label((rows, cols): Coord2) -> String {
    format!("{rows}×{cols}")
}

#[function_component(SizeSelect)]
pub(crate) fn size_select(props: &SizeSelectProps) -> Html {
    html! {
        <menu class="sizes">
            {
                for GameConfig::PRESETS.into_iter().map(|preset| {
                    let size = preset.size();
                    let onclick = props.onselect.reform(move |_: MouseEvent| size);
                    let class = (size == props.current).then_some("active");
                    html! {
                        <li><button {class} {onclick}>{size_label(size)}</button></li>
                    }
                })
            }
        </menu>
    }
}
