use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub on_submit: Callback<()>,
    pub label: AttrValue,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    let onclick = {
        let callback = props.on_submit.clone();
        Callback::from(move |_| {
            callback.emit(());
        })
    };

    html! {
        <button
            type="button"
            onclick={onclick}
            class="submit-button"
        >
            { props.label.clone() }
        </button>
    }
}
