use crate::components::{
    file_input::{collect_files, FileInput},
    media_preview::MediaPreview,
};
use crate::form::{Binder, ValidationErrors};
use crate::upload::reader;
use crate::upload::session::{Completion, DecodeTicket, UploadSession};
use crate::upload::{DecodeError, MediaKind, Rejection};
use gloo::console::{error, log};
use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct UploadProps {
    /// Form field the selected file is written to.
    pub name: AttrValue,
    pub label: AttrValue,
    pub binder: Binder,
    pub errors: ValidationErrors,
    #[prop_or_default]
    pub kind: MediaKind,
    /// Read-only preview URL. Supplying one makes the widget view-only.
    #[prop_or_default]
    pub view_data: Option<AttrValue>,
    /// Existing value shown until the user picks a new file.
    #[prop_or_default]
    pub edit_data: Option<AttrValue>,
    #[prop_or_default]
    pub on_reject: Callback<Rejection>,
}

pub enum Msg {
    DragOver,
    DragLeave,
    Drop(Vec<File>),
    Browse,
    FilesChosen(Vec<File>),
    Decoded(DecodeTicket, Result<String, DecodeError>),
    Cancel,
}

/// Drag-and-drop media picker bound to one form field.
pub struct Upload {
    session: UploadSession<File>,
    drag_active: bool,
    input_ref: NodeRef,
}

impl Component for Upload {
    type Message = Msg;
    type Properties = UploadProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let session = UploadSession::new(
            props.kind,
            props.view_data.as_deref(),
            props.edit_data.as_deref(),
        );

        // A view-only widget never writes a value, so a required rule on
        // its field could never be satisfied.
        if !session.register_with(&*props.binder, &props.name) {
            log!(format!("{}: view-only, not registered", props.name));
        }

        Self {
            session,
            drag_active: false,
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            Msg::DragOver => {
                let changed = !self.drag_active;
                self.drag_active = true;
                changed
            }
            Msg::DragLeave => {
                let changed = self.drag_active;
                self.drag_active = false;
                changed
            }
            Msg::Drop(files) => {
                self.drag_active = false;
                self.select(ctx, files);
                true
            }
            Msg::FilesChosen(files) => self.select(ctx, files),
            Msg::Browse => {
                match self.input_ref.cast::<HtmlInputElement>() {
                    Some(input) => input.click(),
                    None => error!(format!("{}: file input handle is missing", props.name)),
                }
                false
            }
            Msg::Decoded(ticket, result) => match self.session.complete(ticket, result) {
                Completion::Applied => {
                    log!(format!("{}: preview ready ({:?})", props.name, self.session.phase()));
                    true
                }
                Completion::Stale => {
                    log!(format!("{}: discarded stale preview {:?}", props.name, ticket));
                    false
                }
                Completion::Failed(err) => {
                    error!(format!("{}: {}", props.name, err));
                    true
                }
            },
            Msg::Cancel => match self.session.cancel_into(&*props.binder, &props.name) {
                Ok(()) => {
                    log!(format!("{}: upload cancelled", props.name));
                    true
                }
                Err(err) => {
                    error!(format!("{}: {}", props.name, err));
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let kind = self.session.kind();
        let view_only = self.session.is_view_only();

        let body = match self.session.preview().source() {
            Some(src) => html! {
                <div class="upload-preview">
                    <MediaPreview kind={kind} src={src.to_string()} />
                    if !view_only {
                        <button
                            type="button"
                            class="cancel-button"
                            onclick={link.callback(|_| Msg::Cancel)}
                        >
                            { "Cancel" }
                        </button>
                    }
                </div>
            },
            None => {
                let ondragover = link.callback(|e: DragEvent| {
                    e.prevent_default();
                    Msg::DragOver
                });
                let ondragleave = link.callback(|_: DragEvent| Msg::DragLeave);
                let ondrop = link.callback(|e: DragEvent| {
                    e.prevent_default();
                    Msg::Drop(collect_files(e.data_transfer().and_then(|dt| dt.files())))
                });

                html! {
                    <div
                        class="upload-dropzone"
                        ondragover={ondragover}
                        ondragleave={ondragleave}
                        ondrop={ondrop}
                        onclick={link.callback(|_| Msg::Browse)}
                    >
                        <FileInput
                            id={props.name.clone()}
                            accept={kind.accept_attribute()}
                            input_ref={self.input_ref.clone()}
                            on_files_selected={link.callback(Msg::FilesChosen)}
                        />
                        <div class="upload-icon">{ "\u{2601}" }</div>
                        <p class="upload-hint">
                            { format!("Drag and drop an {}, or click to ", kind) }
                            <span class="browse">{ "Browse" }</span>
                            { " a file" }
                        </p>
                        <ul class="upload-guidelines">
                            <li>{ "Aspect ratio 16:9" }</li>
                            <li>{ "Recommended size 1024x576" }</li>
                        </ul>
                    </div>
                }
            }
        };

        html! {
            <div class="upload-field">
                <label class="upload-label" for={props.name.clone()}>
                    { props.label.clone() }
                    if !view_only {
                        <sup class="required-mark">{ "*" }</sup>
                    }
                </label>
                <div
                    class={classes!("upload-target", self.drag_active.then_some("drag-active"))}
                    ondragover={Callback::from(|e: DragEvent| e.prevent_default())}
                    ondrop={Callback::from(|e: DragEvent| e.prevent_default())}
                >
                    { body }
                </div>
                if let Some(err) = props.errors.get(&props.name) {
                    <span class="upload-error">{ format!("{} {}", props.label, err) }</span>
                }
            </div>
        }
    }
}

impl Upload {
    fn select(&mut self, ctx: &Context<Self>, files: Vec<File>) -> bool {
        let props = ctx.props();
        match self.session.select_into(&*props.binder, &props.name, files) {
            Ok(selection) => {
                log!(format!(
                    "{}: selected {} ({}, {} bytes)",
                    props.name,
                    selection.file.name(),
                    selection.mime,
                    selection.file.size()
                ));

                let link = ctx.link().clone();
                let ticket = selection.ticket;
                let mime = selection.mime;
                let file = selection.file;
                wasm_bindgen_futures::spawn_local(async move {
                    let result = reader::read_data_uri(&file, mime).await;
                    link.send_message(Msg::Decoded(ticket, result));
                });
                true
            }
            Err(rejection) => {
                error!(format!("{}: file rejected: {}", props.name, rejection));
                props.on_reject.emit(rejection);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldError, FieldRules, FormBinder};
    use yew::LocalServerRenderer;

    struct NoopBinder;

    impl FormBinder for NoopBinder {
        fn register(&self, _name: &str, _rules: FieldRules) {}
        fn set_value(&self, _name: &str, _value: Option<File>) {}
    }

    fn props(edit_data: Option<&'static str>, errors: ValidationErrors) -> UploadProps {
        UploadProps {
            name: "courseImage".into(),
            label: "Course Thumbnail".into(),
            binder: Binder::new(NoopBinder),
            errors,
            kind: MediaKind::Image,
            view_data: None,
            edit_data: edit_data.map(AttrValue::from),
            on_reject: Callback::default(),
        }
    }

    async fn render(props: UploadProps) -> String {
        LocalServerRenderer::<Upload>::with_props(props).render().await
    }

    #[tokio::test]
    async fn empty_widget_offers_the_drop_zone() {
        let html = render(props(None, ValidationErrors::new())).await;
        assert!(html.contains("upload-dropzone"));
        assert!(html.contains("Drag and drop an image, or click to "));
        assert!(html.contains("image/jpeg,image/png,.jpeg,.jpg,.png"));
        assert!(!html.contains("Cancel"));
    }

    #[tokio::test]
    async fn edit_value_is_shown_inside_the_drop_target() {
        let html = render(props(Some("https://cdn/old.png"), ValidationErrors::new())).await;
        let target = html.find("upload-target").unwrap();
        let image = html.find("https://cdn/old.png").unwrap();
        assert!(target < image);
        assert!(html.contains("Cancel"));
        assert!(!html.contains("upload-dropzone"));
    }

    #[tokio::test]
    async fn required_hint_follows_the_errors_lookup() {
        let html = render(props(None, ValidationErrors::new())).await;
        assert!(!html.contains("is required"));

        let mut errors = ValidationErrors::new();
        errors.insert("courseImage", FieldError::Required);
        let html = render(props(None, errors)).await;
        assert!(html.contains("Course Thumbnail is required"));
    }
}
