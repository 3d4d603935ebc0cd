use crate::utils::Modal;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct HelpProps {
    #[prop_or_default]
    pub open: bool,
    #[prop_or_default]
    pub suppressed: bool,
    pub on_close: Callback<()>,
    pub on_suppress: Callback<bool>,
}

/// The how-to-play dialog, with its "don't show again" checkbox.
#[function_component]
pub(crate) fn HelpDialog(props: &HelpProps) -> Html {
    let onchange = {
        let on_suppress = props.on_suppress.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            log::debug!("suppress help: {}", input.checked());
            on_suppress.emit(input.checked());
        })
    };
    let onclick = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal>
            <dialog id="how-to-play" open={props.open}>
                <article>
                    <h2>{"How to play"}</h2>
                    <p>{"Click a cell to reveal it. Numbers count the mines around a cell, and cells without any spill open on their own."}</p>
                    <p>{"Every few seconds the revealed cells live a generation of Conway's Game of Life: crowded or lonely cells close again, and a closed cell with exactly three open neighbors opens, mine or not."}</p>
                    <p>{"Right click marks a cell with a flag."}</p>
                    <footer>
                        <label>
                            <input type="checkbox" checked={props.suppressed} {onchange}/>
                            {"Don't show this again"}
                        </label>
                        <button {onclick}>{"Close"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}
