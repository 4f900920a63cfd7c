use web_sys::{Event, File, FileList, HtmlInputElement, MouseEvent};
use yew::prelude::*;

/// Flattens a browser `FileList` into owned handles.
pub fn collect_files(list: Option<FileList>) -> Vec<File> {
    match list {
        Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
        None => Vec::new(),
    }
}

#[derive(Properties, PartialEq)]
pub struct FileInputProps {
    pub id: AttrValue,
    pub accept: AttrValue,
    pub input_ref: NodeRef,
    pub on_files_selected: Callback<Vec<File>>,
}

/// Hidden file input. The drop target opens it through `input_ref`.
#[function_component(FileInput)]
pub fn file_input(props: &FileInputProps) -> Html {
    let on_change = {
        let on_files_selected = props.on_files_selected.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let files = collect_files(input.files());
            // Same file picked twice in a row must still fire `change`.
            input.set_value("");
            on_files_selected.emit(files);
        })
    };

    // The programmatic click would otherwise bubble back to the drop target.
    let on_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <input
            id={props.id.clone()}
            ref={props.input_ref.clone()}
            class="upload-input"
            type="file"
            style="display: none"
            accept={props.accept.clone()}
            onchange={on_change}
            onclick={on_click}
        />
    }
}
